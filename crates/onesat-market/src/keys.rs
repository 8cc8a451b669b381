//! Key material for the two address roles of a wallet.
//!
//! A wallet holds one `KeyManager` for funding (payment) and an independent
//! one for ordinals. Keys are never shared between the roles and are never
//! written anywhere by this crate.

use zeroize::Zeroizing;

use onesat_primitives::ec::{PrivateKey, PublicKey};
use onesat_primitives::Network;
use onesat_script::{Address, Script};

use crate::MarketError;

pub struct KeyManager {
    key: PrivateKey,
    network: Network,
    wif: Zeroizing<String>,
}

impl KeyManager {
    /// Import a WIF key.
    ///
    /// Fails with `InvalidKeyEncoding` when the checksum, version byte,
    /// length or compression flag is wrong.
    pub fn from_wif(wif: &str) -> Result<Self, MarketError> {
        let (key, network) =
            PrivateKey::from_wif(wif).map_err(|e| MarketError::InvalidKeyEncoding(e.to_string()))?;
        Ok(Self::from_key(key, network))
    }

    /// A fresh random key.
    pub fn generate(network: Network) -> Self {
        Self::from_key(PrivateKey::generate(), network)
    }

    fn from_key(key: PrivateKey, network: Network) -> Self {
        let wif = Zeroizing::new(key.to_wif(network));
        KeyManager { key, network, wif }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.pub_key()
    }

    pub fn public_key_hash(&self) -> [u8; 20] {
        self.key.pub_key().hash160()
    }

    /// P2PKH address: hash160 of the compressed public key, network-prefixed.
    pub fn address(&self) -> Address {
        Address::from_public_key_hash(&self.public_key_hash(), self.network)
    }

    pub fn locking_script(&self) -> Script {
        Script::p2pkh(&self.public_key_hash())
    }

    /// Compressed-key WIF for this key's network.
    pub fn to_wif(&self) -> &str {
        &self.wif
    }

    pub(crate) fn private_key(&self) -> &PrivateKey {
        &self.key
    }
}

/// Address of `key`; a pure function of the key.
pub fn address_for(key: &KeyManager) -> Address {
    key.address()
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("address", &self.address().address_string)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIF: &str = "L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq";

    #[test]
    fn test_address_is_deterministic() {
        let a = KeyManager::from_wif(WIF).unwrap();
        let b = KeyManager::from_wif(WIF).unwrap();
        assert_eq!(address_for(&a), address_for(&b));
        assert_eq!(a.to_wif(), WIF);
        assert!(a.address().address_string.starts_with('1'));
    }

    #[test]
    fn test_locking_script_matches_address() {
        let key = KeyManager::generate(Network::Testnet);
        assert_eq!(key.locking_script(), key.address().locking_script());
        assert_eq!(key.address().network, Network::Testnet);
    }

    #[test]
    fn test_bad_wif_is_invalid_key_encoding() {
        let err = KeyManager::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWr").unwrap_err();
        assert!(matches!(err, MarketError::InvalidKeyEncoding(_)));
        assert!(KeyManager::from_wif("").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let key = KeyManager::from_wif(WIF).unwrap();
        assert!(!format!("{:?}", key).contains(WIF));
    }
}
