//! The engine's external collaborators.
//!
//! Implementations are free to be remote or in-memory. The engine awaits
//! each call before the next, so none of them need to be re-entrant.

use std::future::Future;

use zeroize::Zeroizing;

use onesat_market::{BroadcastOutcome, Listing, TokenUtxo, Utxo};
use onesat_script::Address;
use onesat_transaction::Outpoint;

use crate::error::ServiceError;

/// Read-only access to the UTXO set, as an indexer sees it.
pub trait UtxoQuery {
    /// Spendable funding UTXOs held by `address`.
    fn funding_utxos(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Vec<Utxo>, ServiceError>> + Send;

    /// Artifact UTXOs (one-satoshi outputs) held by `address`.
    fn ordinal_utxos(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Vec<Utxo>, ServiceError>> + Send;

    /// A single unspent output.
    fn utxo(&self, outpoint: &Outpoint)
        -> impl Future<Output = Result<Utxo, ServiceError>> + Send;

    /// A listed output with its displayed price.
    fn listing(
        &self,
        outpoint: &Outpoint,
    ) -> impl Future<Output = Result<Listing, ServiceError>> + Send;

    /// Token UTXOs of one token held by `address`.
    fn token_utxos(
        &self,
        address: &Address,
        tick_or_id: &str,
    ) -> impl Future<Output = Result<Vec<TokenUtxo>, ServiceError>> + Send;
}

/// Sink for finished transactions.
///
/// A rejection is a normal outcome, not an error; errors are reserved for
/// failing to reach the sink at all. Nothing is retried.
pub trait Broadcaster {
    /// Submit a raw transaction.
    fn broadcast(
        &self,
        raw_tx_hex: &str,
    ) -> impl Future<Output = Result<BroadcastOutcome, ServiceError>> + Send;
}

/// Source of the wallet's two WIF keys.
pub trait KeyProvider {
    /// WIF of the funding key.
    fn payment_wif(&self) -> Result<Zeroizing<String>, ServiceError>;

    /// WIF of the key holding artifacts.
    fn ordinal_wif(&self) -> Result<Zeroizing<String>, ServiceError>;
}
