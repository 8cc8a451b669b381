//! The OrdinalLock listing covenant.
//!
//! Layout:
//!
//! ```text
//! [inscription envelope] PREFIX <owner pkh:20> <payout TxOut bytes> SUFFIX
//! ```
//!
//! The payout push is a serialized transaction output (8-byte LE value,
//! varint script length, script). The suffix checks that output #1 of the
//! spending transaction equals those bytes, which lets anyone complete a
//! purchase without the seller's signature. The owner hash gates the
//! cancel branch, which takes an ordinary signature.

mod consts;

pub use consts::{ORDLOCK_PREFIX, ORDLOCK_SUFFIX};

use onesat_primitives::util::{WireReader, WireWriter};
use onesat_primitives::Network;

use crate::chunk::decode_script;
use crate::{Address, Script, ScriptError};

/// The seller's payout output embedded in the covenant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    pub satoshis: u64,
    pub locking_script: Script,
}

impl Payout {
    /// Payout of `satoshis` to a P2PKH `address`.
    pub fn to_address(address: &Address, satoshis: u64) -> Self {
        Payout {
            satoshis,
            locking_script: address.locking_script(),
        }
    }

    /// Serialized `TxOut` form: value, varint length, script.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(9 + self.locking_script.len());
        writer.write_u64_le(self.satoshis);
        writer.write_var_bytes(self.locking_script.to_bytes());
        writer.into_bytes()
    }

    /// Parse a serialized `TxOut`; trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ScriptError> {
        let malformed = |what: &str| ScriptError::MalformedOrdLock(format!("payout {}", what));
        let mut reader = WireReader::new(bytes);
        let satoshis = reader.read_u64_le().map_err(|_| malformed("value truncated"))?;
        let script = reader
            .read_var_bytes()
            .map_err(|_| malformed("script truncated"))?;
        if reader.remaining() != 0 {
            return Err(malformed("has trailing bytes"));
        }
        Ok(Payout {
            satoshis,
            locking_script: Script::from_bytes(script),
        })
    }
}

/// Decoded contents of an OrdinalLock script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrdLockData {
    /// Hash of the key allowed to cancel the listing.
    pub owner_pkh: [u8; 20],
    /// The output a purchase must pay at index #1.
    pub payout: Payout,
    /// Envelope bytes preceding the covenant (empty for plain artifacts).
    pub inscription_prefix: Script,
}

impl OrdLockData {
    pub fn new(owner_pkh: [u8; 20], payout: Payout) -> Self {
        OrdLockData {
            owner_pkh,
            payout,
            inscription_prefix: Script::new(),
        }
    }

    /// Listed price, i.e. the payout value.
    pub fn price(&self) -> u64 {
        self.payout.satoshis
    }

    /// The address the payout pays, when it is a P2PKH.
    pub fn seller_address(&self, network: Network) -> Result<Address, ScriptError> {
        Address::from_locking_script(&self.payout.locking_script, network)
    }

    /// Encode into a locking script.
    pub fn lock(&self) -> Result<Script, ScriptError> {
        ordinal_lock_script(
            &self.inscription_prefix,
            &self.owner_pkh,
            &self.payout.to_bytes(),
        )
    }

    /// Decode a listing script.
    ///
    /// Fails with `MalformedOrdLock` when the prefix is absent, the pushes
    /// between prefix and suffix are not a 20-byte hash and a payout, or the
    /// script does not end with the suffix.
    pub fn decode(script: &Script) -> Result<Self, ScriptError> {
        let bytes = script.to_bytes();
        let start = find(bytes, &ORDLOCK_PREFIX)
            .ok_or_else(|| ScriptError::MalformedOrdLock("prefix not found".to_string()))?;
        let body = &bytes[start + ORDLOCK_PREFIX.len()..];

        let chunks = decode_script(body)
            .map_err(|e| ScriptError::MalformedOrdLock(format!("covenant body: {}", e)))?;
        let (owner, payout) = match (chunks.first(), chunks.get(1)) {
            (Some(owner), Some(payout)) => (owner, payout),
            _ => return Err(ScriptError::MalformedOrdLock("missing pushes".to_string())),
        };

        let owner_pkh: [u8; 20] = owner
            .data
            .as_deref()
            .and_then(|d| d.try_into().ok())
            .ok_or_else(|| ScriptError::MalformedOrdLock("owner hash is not 20 bytes".to_string()))?;
        let payout_bytes = payout
            .data
            .as_deref()
            .ok_or_else(|| ScriptError::MalformedOrdLock("payout is not a push".to_string()))?;

        let consumed = owner.encoded_len() + payout.encoded_len();
        if body[consumed..] != ORDLOCK_SUFFIX[..] {
            return Err(ScriptError::MalformedOrdLock("suffix not found".to_string()));
        }

        Ok(OrdLockData {
            owner_pkh,
            payout: Payout::from_bytes(payout_bytes)?,
            inscription_prefix: Script::from_bytes(&bytes[..start]),
        })
    }
}

/// Concatenate `envelope`, the covenant prefix, the owner and payout pushes
/// and the covenant suffix.
pub fn ordinal_lock_script(
    envelope: &Script,
    owner_pkh: &[u8; 20],
    payout_bytes: &[u8],
) -> Result<Script, ScriptError> {
    let mut script = envelope.clone();
    script.append_raw(&ORDLOCK_PREFIX);
    script.append_push_data(owner_pkh)?;
    script.append_push_data(payout_bytes)?;
    script.append_raw(&ORDLOCK_SUFFIX);
    Ok(script)
}

/// Whether `script` contains the covenant prefix and suffix.
pub fn is_ordinal_lock(script: &Script) -> bool {
    let bytes = script.to_bytes();
    find(bytes, &ORDLOCK_PREFIX).is_some() && bytes.ends_with(&ORDLOCK_SUFFIX)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Inscription;

    fn sample() -> OrdLockData {
        OrdLockData::new(
            [0xaa; 20],
            Payout {
                satoshis: 100_000,
                locking_script: Script::p2pkh(&[0xbb; 20]),
            },
        )
    }

    #[test]
    fn test_payout_bytes_layout() {
        let payout = sample().payout;
        let bytes = payout.to_bytes();
        assert_eq!(&bytes[..8], &100_000u64.to_le_bytes());
        assert_eq!(bytes[8], 25);
        assert_eq!(bytes.len(), 34);
        assert_eq!(Payout::from_bytes(&bytes).unwrap(), payout);
    }

    #[test]
    fn test_lock_layout() {
        let script = sample().lock().unwrap();
        let bytes = script.to_bytes();
        assert!(bytes.starts_with(&ORDLOCK_PREFIX));
        assert_eq!(bytes[102], 20);
        assert_eq!(&bytes[103..123], &[0xaa; 20]);
        assert_eq!(bytes[123], 34);
        assert!(bytes.ends_with(&ORDLOCK_SUFFIX));
        assert_eq!(bytes.len(), 102 + 21 + 35 + ORDLOCK_SUFFIX.len());
        assert!(is_ordinal_lock(&script));
    }

    #[test]
    fn test_decode_roundtrip() {
        let data = sample();
        let decoded = OrdLockData::decode(&data.lock().unwrap()).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(decoded.price(), 100_000);
    }

    #[test]
    fn test_decode_with_envelope_prefix() {
        let mut data = sample();
        data.inscription_prefix = Inscription::new("application/bsv-20", br#"{"p":"bsv-20"}"#.to_vec())
            .envelope()
            .unwrap();
        let script = data.lock().unwrap();
        let decoded = OrdLockData::decode(&script).unwrap();
        assert_eq!(decoded.inscription_prefix, data.inscription_prefix);
        assert!(Inscription::parse(&script).unwrap().is_some());
    }

    #[test]
    fn test_decode_rejects_plain_p2pkh() {
        let err = OrdLockData::decode(&Script::p2pkh(&[1; 20])).unwrap_err();
        assert!(matches!(err, ScriptError::MalformedOrdLock(_)));
    }

    #[test]
    fn test_decode_rejects_truncated_suffix() {
        let script = sample().lock().unwrap();
        let cut = Script::from_bytes(&script.to_bytes()[..script.len() - 1]);
        assert!(OrdLockData::decode(&cut).is_err());
        assert!(!is_ordinal_lock(&cut));
    }

    #[test]
    fn test_suffix_commits_to_anyonecanpay_all_forkid() {
        assert!(ORDLOCK_SUFFIX.windows(2).any(|w| w == [0x01, 0xc1]));
    }
}
