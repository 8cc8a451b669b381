//! Transaction engine for a 1Sat ordinals marketplace.
//!
//! Builds, signs and checks the transactions behind every marketplace
//! action: inscribing an artifact, listing it under the OrdinalLock
//! covenant, buying or cancelling a listing, bsv-20/bsv-21 token actions,
//! and plain transfers. Each flow runs to completion synchronously and
//! returns a [`PendingTransaction`] for the caller to review and broadcast.
//!
//! ```no_run
//! use onesat_market::{KeyManager, MarketConfig, TransactionAssembler, Utxo};
//! use onesat_script::Inscription;
//!
//! # fn run(funding: Vec<Utxo>) -> Result<(), onesat_market::MarketError> {
//! let payment = KeyManager::from_wif("L4o1GXuUSHauk19f9Cfpm1qfSXZuGLBUAC2VZM6vdmfMxRxAYkWq")?;
//! let ordinal = KeyManager::generate(payment.network());
//! let assembler = TransactionAssembler::new(MarketConfig::default());
//!
//! let artifact = Inscription::new("text/plain", b"gm".to_vec());
//! let pending = assembler.inscribe(&payment, &funding, &ordinal.address(), &artifact)?;
//! println!("{} ({} sats fee)", pending.txid, pending.fee_satoshis);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod cache;
pub mod config;
pub mod fees;
pub mod keys;
pub mod selector;
pub mod types;

mod error;
pub use assembler::{PurchaseDraft, SendAmount, TransactionAssembler};
pub use cache::UtxoCache;
pub use config::MarketConfig;
pub use error::MarketError;
pub use fees::FeeRate;
pub use keys::KeyManager;
pub use selector::Selection;
pub use types::{
    BroadcastOutcome, Listing, PendingTransaction, TokenAction, TokenProtocol, TokenUtxo, Utxo,
};
