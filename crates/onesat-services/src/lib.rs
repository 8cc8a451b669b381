#![deny(missing_docs)]

//! # onesat-services
//!
//! The collaborators around the transaction engine: an ordinals indexer
//! queried for UTXOs and listings, an ARC endpoint receiving finished
//! transactions, and a provider of the two wallet keys. [`Marketplace`]
//! ties them to a [`TransactionAssembler`](onesat_market::TransactionAssembler),
//! awaiting each call in turn.
//!
//! # Example
//!
//! ```no_run
//! use onesat_market::{MarketConfig, UtxoCache};
//! use onesat_services::{
//!     ArcBroadcaster, BroadcastConfig, IndexerClient, IndexerConfig, Marketplace,
//!     StaticKeyProvider,
//! };
//!
//! # async fn run() -> Result<(), onesat_services::ServiceError> {
//! let market = Marketplace::new(
//!     MarketConfig::default(),
//!     IndexerClient::new(IndexerConfig::default()),
//!     ArcBroadcaster::new(BroadcastConfig::default()),
//!     StaticKeyProvider::new("<payment wif>", "<ordinal wif>"),
//! );
//! let mut cache = UtxoCache::new();
//! let pending = market
//!     .send(&cache, &"1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr".parse()?, onesat_market::SendAmount::Max)
//!     .await?;
//! let outcome = market.submit(&pending, &mut cache).await?;
//! # Ok(())
//! # }
//! ```

pub mod arc;
pub mod error;
pub mod indexer;
pub mod keys;
pub mod marketplace;
pub mod traits;
pub mod types;


pub use arc::ArcBroadcaster;
pub use error::ServiceError;
pub use indexer::IndexerClient;
pub use keys::StaticKeyProvider;
pub use marketplace::Marketplace;
pub use traits::{Broadcaster, KeyProvider, UtxoQuery};
pub use types::{ArcResponse, ArcStatus, BroadcastConfig, IndexerConfig, Txo};
