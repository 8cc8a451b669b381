//! Cryptographic and encoding primitives for the 1Sat ordinals engine.
//!
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Base58Check encoding
//! - Little-endian wire reader/writer with VarInt support
//! - secp256k1 keys, WIF import/export, and DER signatures
//! - Network selection (mainnet / testnet version bytes)

pub mod base58;
pub mod ec;
pub mod hash;
pub mod network;
pub mod util;

mod error;
pub use error::PrimitivesError;
pub use network::Network;
