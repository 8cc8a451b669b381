//! ECDSA signature with strict DER serialization.

use k256::ecdsa;

use crate::PrimitivesError;

/// An ECDSA signature, kept in low-S form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    pub(crate) fn from_k256(sig: ecdsa::Signature) -> Self {
        let inner = sig.normalize_s().unwrap_or(sig);
        Signature { inner }
    }

    pub(crate) fn as_k256(&self) -> &ecdsa::Signature {
        &self.inner
    }

    /// Parse a DER-encoded signature (no trailing sighash byte).
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let sig = ecdsa::Signature::from_der(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Self::from_k256(sig))
    }

    /// DER encoding: `0x30 len 0x02 rlen r 0x02 slen s`.
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }
}
