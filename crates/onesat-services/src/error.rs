//! Error types for collaborator calls.

use onesat_market::MarketError;

/// Errors that can occur when talking to the indexer, the broadcaster or
/// the key provider, or while assembling a transaction from their data.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Error message from server.
        message: String,
    },

    /// Resource not found (404).
    #[error("not found")]
    NotFound,

    /// The key provider could not supply a key.
    #[error("key unavailable: {0}")]
    KeyUnavailable(String),

    /// Transaction assembly failed.
    #[error(transparent)]
    Market(#[from] MarketError),
}

impl From<onesat_script::ScriptError> for ServiceError {
    fn from(e: onesat_script::ScriptError) -> Self {
        ServiceError::Market(e.into())
    }
}
