//! Reference to a specific output of a previous transaction.

use std::fmt;
use std::str::FromStr;

use crate::TransactionError;

/// A `(txid, vout)` pair.
///
/// `txid` is held in internal byte order (the order that goes on the wire);
/// the hex form used in display strings and indexer APIs is byte-reversed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outpoint {
    pub txid: [u8; 32],
    pub vout: u32,
}

impl Outpoint {
    pub fn new(txid: [u8; 32], vout: u32) -> Self {
        Outpoint { txid, vout }
    }

    /// Build from a display-order txid hex string.
    pub fn from_txid_hex(txid_hex: &str, vout: u32) -> Result<Self, TransactionError> {
        let mut txid: [u8; 32] = hex::decode(txid_hex)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| TransactionError::InvalidOutpoint(format!("bad txid '{}'", txid_hex)))?;
        txid.reverse();
        Ok(Outpoint { txid, vout })
    }

    /// Display-order txid hex.
    pub fn txid_hex(&self) -> String {
        let mut id = self.txid;
        id.reverse();
        hex::encode(id)
    }
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.txid_hex(), self.vout)
    }
}

impl fmt::Debug for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Outpoint({})", self)
    }
}

impl FromStr for Outpoint {
    type Err = TransactionError;

    /// Accepts both `txid_vout` and `txid.vout`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, vout) = s
            .split_once('_')
            .or_else(|| s.split_once('.'))
            .ok_or_else(|| TransactionError::InvalidOutpoint(s.to_string()))?;
        let vout = vout
            .parse::<u32>()
            .map_err(|_| TransactionError::InvalidOutpoint(s.to_string()))?;
        Outpoint::from_txid_hex(txid, vout)
    }
}

impl serde::Serialize for Outpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Outpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn test_display_and_parse() {
        let op = Outpoint::from_txid_hex(TXID, 3).unwrap();
        assert_eq!(op.to_string(), format!("{}_3", TXID));
        assert_eq!(op.txid[0], 0x3b);
        assert_eq!(format!("{}_3", TXID).parse::<Outpoint>().unwrap(), op);
        assert_eq!(format!("{}.3", TXID).parse::<Outpoint>().unwrap(), op);
    }

    #[test]
    fn test_rejects_bad_strings() {
        assert!("nope".parse::<Outpoint>().is_err());
        assert!(format!("{}_x", TXID).parse::<Outpoint>().is_err());
        assert!("abcd_0".parse::<Outpoint>().is_err());
    }

    #[test]
    fn test_serde_string() {
        let op = Outpoint::from_txid_hex(TXID, 0).unwrap();
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, format!("\"{}_0\"", TXID));
        assert_eq!(serde_json::from_str::<Outpoint>(&json).unwrap(), op);
    }
}
