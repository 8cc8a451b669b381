/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. an input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// An error occurred while producing an unlocking script.
    #[error("signing error: {0}")]
    SigningError(String),
    /// Wire-format decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// A satoshi total does not fit in a `u64`.
    #[error("{0} total overflows u64")]
    ValueOverflow(&'static str),
    /// An outpoint string is not `txid_vout` or `txid.vout`.
    #[error("invalid outpoint: {0}")]
    InvalidOutpoint(String),
    /// An underlying script error.
    #[error("script error: {0}")]
    Script(#[from] onesat_script::ScriptError),
    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] onesat_primitives::PrimitivesError),
}

/// Map a short read of `field` to `SerializationError`.
pub(crate) fn wire(
    field: &'static str,
) -> impl Fn(onesat_primitives::PrimitivesError) -> TransactionError {
    move |e| TransactionError::SerializationError(format!("reading {}: {}", field, e))
}
