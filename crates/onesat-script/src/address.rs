//! P2PKH address handling.
//!
//! An address is Base58Check over `version || hash160(pubkey)`, with the
//! version byte selecting mainnet (0x00) or testnet (0x6f).

use std::fmt;
use std::str::FromStr;

use onesat_primitives::base58;
use onesat_primitives::ec::PublicKey;
use onesat_primitives::Network;

use crate::{Script, ScriptError};

/// A P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The Base58Check address string.
    pub address_string: String,
    /// The 20-byte hash160 of the compressed public key.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check address string, detecting the network from its
    /// version byte.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let payload = base58::check_decode(addr)
            .map_err(|e| ScriptError::InvalidAddress(format!("'{}': {}", addr, e)))?;
        if payload.len() != 21 {
            return Err(ScriptError::InvalidAddress(format!(
                "'{}': wrong payload length {}",
                addr,
                payload.len()
            )));
        }
        let network = Network::from_p2pkh_version(payload[0])
            .ok_or_else(|| ScriptError::UnsupportedAddress(addr.to_string()))?;

        let mut public_key_hash = [0u8; 20];
        public_key_hash.copy_from_slice(&payload[1..]);
        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash,
            network,
        })
    }

    /// Encode a 20-byte public key hash for `network`.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(21);
        payload.push(network.p2pkh_version());
        payload.extend_from_slice(hash);
        Address {
            address_string: base58::check_encode(&payload),
            public_key_hash: *hash,
            network,
        }
    }

    /// Address of a public key (hash160 of its compressed encoding).
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(), network)
    }

    /// Recover the address a P2PKH locking script pays to.
    pub fn from_locking_script(script: &Script, network: Network) -> Result<Self, ScriptError> {
        Ok(Self::from_public_key_hash(&script.public_key_hash()?, network))
    }

    /// The P2PKH locking script paying this address.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh(&self.public_key_hash)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}
