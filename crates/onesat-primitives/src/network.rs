//! Network selection and the version bytes that go with it.

use serde::{Deserialize, Serialize};

use crate::PrimitivesError;

/// The chain a key or address belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// BSV mainnet (addresses start with '1', WIF with 'K'/'L'/'5').
    #[default]
    Mainnet,
    /// BSV testnet (addresses start with 'm'/'n', WIF with 'c'/'9').
    Testnet,
}

impl Network {
    /// Version byte prepended to a P2PKH address payload.
    pub fn p2pkh_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet => 0x6f,
        }
    }

    /// Version byte prepended to a WIF private key payload.
    pub fn wif_version(&self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet => 0xef,
        }
    }

    /// Detect the network from a WIF version byte.
    pub fn from_wif_version(version: u8) -> Result<Self, PrimitivesError> {
        match version {
            0x80 => Ok(Network::Mainnet),
            0xef => Ok(Network::Testnet),
            other => Err(PrimitivesError::InvalidWifVersion(other)),
        }
    }

    /// Detect the network from a P2PKH address version byte.
    pub fn from_p2pkh_version(version: u8) -> Option<Self> {
        match version {
            0x00 => Some(Network::Mainnet),
            0x6f => Some(Network::Testnet),
            _ => None,
        }
    }
}
