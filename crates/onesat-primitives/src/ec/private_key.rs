//! secp256k1 private key with WIF import/export.
//!
//! A WIF string is Base58Check over `version || scalar || 0x01`, where the
//! trailing `0x01` marks a compressed public key. Only compressed keys are
//! produced; uncompressed WIF (no flag byte) is still accepted on import.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::network::Network;
use crate::PrimitivesError;

const PRIVATE_KEY_LEN: usize = 32;

const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 signing key.
///
/// The underlying `SigningKey` zeroizes its scalar on drop.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh key from the operating system RNG.
    pub fn generate() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Build a key from a raw 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|e| PrivateKey::invalid(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Build a key from a 64-character hex scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string, returning the key and the network its version
    /// byte names.
    ///
    /// Fails on a bad checksum, an unknown version byte, a wrong payload
    /// length, or a compression flag other than `0x01`.
    pub fn from_wif(wif: &str) -> Result<(Self, Network), PrimitivesError> {
        let payload = base58::check_decode(wif.trim()).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => PrimitivesError::ChecksumMismatch,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?;

        match payload.len() {
            // version + scalar + compression flag
            34 if payload[33] != COMPRESS_MAGIC => {
                return Err(PrimitivesError::InvalidWif(
                    "invalid compression flag".to_string(),
                ));
            }
            33 | 34 => {}
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )));
            }
        }

        let network = Network::from_wif_version(payload[0])?;
        let key = Self::from_bytes(&payload[1..1 + PRIVATE_KEY_LEN])?;
        Ok((key, network))
    }

    /// Encode as a compressed-key WIF string for `network`.
    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_LEN + 1);
        payload.push(network.wif_version());
        payload.extend_from_slice(&self.to_bytes());
        payload.push(COMPRESS_MAGIC);
        base58::check_encode(&payload)
    }

    /// The raw 32-byte scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// The matching public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(*self.inner.verifying_key())
    }

    /// Sign a 32-byte digest with RFC6979 nonces; the result is low-S.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        let sig: k256::ecdsa::Signature = self
            .inner
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature::from_k256(sig))
    }

    fn invalid(msg: String) -> PrimitivesError {
        PrimitivesError::InvalidPrivateKey(msg)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({})", self.pub_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694";

    #[test]
    fn test_wif_roundtrip_mainnet() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let wif = key.to_wif(Network::Mainnet);
        let (decoded, network) = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(decoded, key);
        assert_eq!(network, Network::Mainnet);
        assert!(wif.starts_with('K') || wif.starts_with('L'));
    }

    #[test]
    fn test_wif_roundtrip_testnet() {
        let key = PrivateKey::generate();
        let wif = key.to_wif(Network::Testnet);
        let (decoded, network) = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(decoded, key);
        assert_eq!(network, Network::Testnet);
    }

    #[test]
    fn test_known_wif_decodes() {
        let (_, network) =
            PrivateKey::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq").unwrap();
        assert_eq!(network, Network::Mainnet);
    }

    #[test]
    fn test_malformed_wif_rejected() {
        // altered character
        assert!(PrivateKey::from_wif("L401GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq").is_err());
        // truncated
        assert!(PrivateKey::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkW").is_err());
    }

    #[test]
    fn test_wrong_version_byte_rejected() {
        let mut payload = vec![0x42u8];
        payload.extend_from_slice(&hex::decode(KEY_HEX).unwrap());
        payload.push(COMPRESS_MAGIC);
        let wif = base58::check_encode(&payload);
        assert!(matches!(
            PrivateKey::from_wif(&wif),
            Err(PrimitivesError::InvalidWifVersion(0x42))
        ));
    }

    #[test]
    fn test_sign_verifies() {
        let key = PrivateKey::from_hex(KEY_HEX).unwrap();
        let digest = crate::hash::sha256(b"1sat");
        let sig = key.sign(&digest).unwrap();
        assert!(key.pub_key().verify(&digest, &sig));
    }
}
