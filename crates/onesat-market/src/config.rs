//! Engine configuration.

use serde::{Deserialize, Serialize};

use onesat_primitives::Network;
use onesat_script::Address;

use crate::fees::FeeRate;
use crate::MarketError;

/// Settings shared by every flow.
///
/// Loaded from JSON with `MarketConfig::from_json`; absent fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Network used for addresses derived by the engine.
    pub network: Network,
    /// Miner fee rate in satoshis per 1000 bytes.
    pub fee_rate_sats_per_kb: u64,
    /// Marketplace fee as a fraction of the listing price.
    pub market_fee_rate: f64,
    /// Marketplace fee charged when the computed fee rounds to zero.
    pub minimum_market_fee: u64,
    /// Address receiving the marketplace fee on purchases.
    pub market_fee_address: String,
    /// Value of every artifact output.
    pub ordinal_output_sats: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            fee_rate_sats_per_kb: 50,
            market_fee_rate: 0.04,
            minimum_market_fee: 10_000,
            market_fee_address: String::new(),
            ordinal_output_sats: 1,
        }
    }
}

impl MarketConfig {
    pub fn from_json(json: &str) -> Result<Self, MarketError> {
        let config: MarketConfig =
            serde_json::from_str(json).map_err(|e| MarketError::Config(e.to_string()))?;
        if !(0.0..1.0).contains(&config.market_fee_rate) {
            return Err(MarketError::Config(format!(
                "market_fee_rate {} outside [0, 1)",
                config.market_fee_rate
            )));
        }
        Ok(config)
    }

    pub fn fee_rate(&self) -> FeeRate {
        FeeRate::from_sats_per_kb(self.fee_rate_sats_per_kb)
    }

    /// The parsed marketplace fee address.
    pub fn market_fee_address(&self) -> Result<Address, MarketError> {
        if self.market_fee_address.is_empty() {
            return Err(MarketError::Config(
                "market_fee_address is not set".to_string(),
            ));
        }
        Address::from_string(&self.market_fee_address)
            .map_err(|e| MarketError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.fee_rate_sats_per_kb, 50);
        assert_eq!(config.minimum_market_fee, 10_000);
        assert!(config.market_fee_address().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = MarketConfig::from_json(
            r#"{"network":"testnet","market_fee_address":"mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd"}"#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.market_fee_rate, 0.04);
        assert_eq!(config.market_fee_address().unwrap().network, Network::Testnet);
    }

    #[test]
    fn test_from_json_rejects_bad_rate() {
        assert!(MarketConfig::from_json(r#"{"market_fee_rate":1.5}"#).is_err());
        assert!(MarketConfig::from_json("not json").is_err());
    }
}
