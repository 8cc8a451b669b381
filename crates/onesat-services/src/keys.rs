//! A key provider holding both keys in memory.

use zeroize::Zeroizing;

use crate::error::ServiceError;
use crate::traits::KeyProvider;

/// Fixed WIF keys, for tests and for callers that manage storage themselves.
#[derive(Clone)]
pub struct StaticKeyProvider {
    payment: Zeroizing<String>,
    ordinal: Zeroizing<String>,
}

impl StaticKeyProvider {
    /// Hold `payment_wif` and `ordinal_wif`.
    pub fn new(payment_wif: &str, ordinal_wif: &str) -> Self {
        Self {
            payment: Zeroizing::new(payment_wif.to_string()),
            ordinal: Zeroizing::new(ordinal_wif.to_string()),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn payment_wif(&self) -> Result<Zeroizing<String>, ServiceError> {
        if self.payment.is_empty() {
            return Err(ServiceError::KeyUnavailable("no payment key".to_string()));
        }
        Ok(self.payment.clone())
    }

    fn ordinal_wif(&self) -> Result<Zeroizing<String>, ServiceError> {
        if self.ordinal.is_empty() {
            return Err(ServiceError::KeyUnavailable("no ordinal key".to_string()));
        }
        Ok(self.ordinal.clone())
    }
}

impl std::fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyProvider").finish_non_exhaustive()
    }
}
