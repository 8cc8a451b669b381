//! Base58Check encoding used for WIF keys and P2PKH addresses.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Encode `payload` with a trailing 4-byte SHA-256d checksum.
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = sha256d(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

/// Decode a Base58Check string and verify its checksum.
///
/// Returns the payload without the checksum.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let mut decoded = bs58::decode(s)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))?;
    if decoded.len() < 5 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let split = decoded.len() - 4;
    let checksum = sha256d(&decoded[..split]);
    if checksum[..4] != decoded[split..] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    decoded.truncate(split);
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_roundtrip() {
        let payload = [0x00u8, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_known_address_decodes() {
        let payload = check_decode("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        assert_eq!(payload[0], 0x00);
        assert_eq!(
            hex::encode(&payload[1..]),
            "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        // Last character altered.
        let result = check_decode("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMs");
        assert!(matches!(result, Err(PrimitivesError::ChecksumMismatch)));
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert!(matches!(
            check_decode("0OIl"),
            Err(PrimitivesError::InvalidBase58(_))
        ));
    }
}
