//! Script encoding and decoding for the 1Sat ordinals engine.
//!
//! Provides the `Script` type, opcode definitions, chunk parsing, P2PKH
//! addresses, the inscription envelope, the OrdinalLock listing covenant and
//! the bsv-20 token inscription JSON.

pub mod address;
pub mod chunk;
pub mod inscription;
pub mod opcodes;
pub mod ordlock;
pub mod script;
pub mod token;

mod error;
pub use address::Address;
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use inscription::Inscription;
pub use onesat_primitives::Network;
pub use ordlock::{OrdLockData, Payout};
pub use script::Script;
pub use token::{TokenInscription, TokenOp};
