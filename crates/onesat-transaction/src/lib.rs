//! Transaction building and signing for the 1Sat ordinals engine.
//!
//! Provides the `Transaction` type with inputs and outputs, BIP-143 FORKID
//! signature hashes, the `InputRole` signing contract, and unlocking
//! templates for P2PKH inputs and OrdinalLock listings.

pub mod input;
pub mod outpoint;
pub mod output;
pub mod role;
pub mod sighash;
pub mod template;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use input::TransactionInput;
pub use outpoint::Outpoint;
pub use output::TransactionOutput;
pub use role::InputRole;
pub use transaction::Transaction;
