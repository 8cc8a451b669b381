#![deny(missing_docs)]

//! 1Sat ordinals marketplace SDK.
//!
//! Re-exports every layer of the engine for single-crate usage.

pub use onesat_market as market;
pub use onesat_primitives as primitives;
pub use onesat_script as script;
pub use onesat_services as services;
pub use onesat_transaction as transaction;

pub use onesat_market::{
    KeyManager, Listing, MarketConfig, MarketError, PendingTransaction, TransactionAssembler,
    Utxo, UtxoCache,
};
pub use onesat_services::{Marketplace, ServiceError};
