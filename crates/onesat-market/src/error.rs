use onesat_script::ScriptError;
use onesat_transaction::TransactionError;

/// Errors surfaced by the marketplace flows.
///
/// Every variant is recoverable by the caller: nothing is broadcast when a
/// flow fails, so the user can retry with different inputs.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// A WIF key failed its checksum, version byte or length check.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Externally supplied script or identifier data could not be decoded.
    #[error("malformed script: {0}")]
    MalformedScript(String),

    /// The funding UTXOs cannot cover the required amount plus fee.
    #[error("insufficient funds: need {needed} sats, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    /// The token UTXOs cannot cover the requested token amount.
    #[error("insufficient tokens: need {needed}, have {available}")]
    InsufficientTokens { needed: u64, available: u64 },

    /// No funding UTXO was supplied at all.
    #[error("no funding utxo available")]
    NoFundingUtxo,

    /// The caller's ordinal key does not own the artifact or listing.
    #[error("caller does not own this listing")]
    NotListingOwner,

    /// The price decoded from the listing differs from the price shown.
    #[error("price mismatch: displayed {expected}, listing pays {actual}")]
    PriceMismatch { expected: u64, actual: u64 },

    /// The signed transaction spends less than it creates.
    #[error("fee inadequate: inputs {inputs} sats < outputs {outputs} sats")]
    FeeInadequate { inputs: u64, outputs: u64 },

    /// Output #1 of a purchase no longer matches the listing's payout.
    #[error("purchase output #1 does not match the listing payout")]
    CovenantMismatch,

    /// The configuration is incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A script could not be built from caller-supplied data.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// Transaction building or signing failed.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

impl MarketError {
    /// Classify a failure decoding script data that came from outside.
    pub(crate) fn malformed(e: ScriptError) -> Self {
        MarketError::MalformedScript(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_decode_errors_differ() {
        assert!(matches!(
            MarketError::from(ScriptError::DataTooBig),
            MarketError::Script(ScriptError::DataTooBig)
        ));
        assert!(matches!(
            MarketError::malformed(ScriptError::NotP2PKH),
            MarketError::MalformedScript(_)
        ));
    }
}
