//! Client configuration and the wire shapes of the indexer and ARC APIs.

use base64::Engine;
use serde::{Deserialize, Serialize};

use onesat_market::{Listing, MarketError, Utxo};
use onesat_primitives::Network;
use onesat_script::Script;

/// Configuration for an [`IndexerClient`](crate::IndexerClient).
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Base URL for the indexer API (e.g. `https://ordinals.gorillapool.io/api`).
    pub base_url: String,
    /// Optional Bearer token for authentication.
    pub api_key: Option<String>,
    /// Network of the addresses the indexer reports.
    pub network: Network,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ordinals.gorillapool.io/api".to_string(),
            api_key: None,
            network: Network::Mainnet,
        }
    }
}

/// ARC statuses a broadcast can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArcStatus {
    /// Transaction was received by ARC.
    Received,
    /// Transaction has been stored.
    Stored,
    /// Transaction announced to the network.
    AnnouncedToNetwork,
    /// Transaction sent to the network.
    SentToNetwork,
    /// Transaction seen on the network.
    SeenOnNetwork,
    /// Transaction has been mined.
    Mined,
}

impl ArcStatus {
    /// Returns the integer status code used by the ARC API.
    pub fn as_code(&self) -> i32 {
        match self {
            Self::Received => 2,
            Self::Stored => 3,
            Self::AnnouncedToNetwork => 4,
            Self::SentToNetwork => 6,
            Self::SeenOnNetwork => 8,
            Self::Mined => 9,
        }
    }
}

/// Configuration for an [`ArcBroadcaster`](crate::ArcBroadcaster).
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Base URL for the ARC API (e.g. `https://arc.taal.com/v1`).
    pub base_url: String,
    /// Optional Bearer token for authentication.
    pub api_key: Option<String>,
    /// Wait for the transaction to reach this status before returning.
    pub wait_for_status: Option<ArcStatus>,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            base_url: "https://arc.taal.com/v1".to_string(),
            api_key: None,
            wait_for_status: None,
        }
    }
}

/// Response from the ARC API, for accepted and rejected transactions alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcResponse {
    /// Transaction ID.
    #[serde(default)]
    pub txid: String,
    /// Transaction status string (e.g. `SEEN_ON_NETWORK`).
    #[serde(default)]
    pub tx_status: Option<String>,
    /// Status code (HTTP-style for errors).
    #[serde(default)]
    pub status: Option<i32>,
    /// Response title.
    #[serde(default)]
    pub title: Option<String>,
    /// Detail/error message.
    #[serde(default)]
    pub detail: Option<String>,
    /// Extra information from the node.
    #[serde(default)]
    pub extra_info: Option<String>,
}

impl ArcResponse {
    /// Whether ARC refused the transaction outright.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self.tx_status.as_deref(),
            Some("REJECTED") | Some("DOUBLE_SPEND_ATTEMPTED")
        )
    }

    /// The most specific explanation ARC gave.
    pub fn reason(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.extra_info.clone().filter(|s| !s.is_empty()))
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "rejected".to_string())
    }
}

/// A transaction output as the indexer reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Txo {
    /// Transaction ID.
    pub txid: String,
    /// Output index.
    pub vout: u32,
    /// Output value.
    pub satoshis: u64,
    /// Locking script, base64.
    pub script: String,
    /// Indexed protocol data.
    #[serde(default)]
    pub data: Option<TxoData>,
}

/// Protocol data attached to a [`Txo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxoData {
    /// Present when the output is an OrdinalLock listing.
    #[serde(default)]
    pub list: Option<ListData>,
}

/// Listing details of a [`Txo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData {
    /// Price shown for the listing.
    pub price: u64,
}

impl Txo {
    /// Convert to an engine [`Utxo`]; an undecodable script is `MalformedScript`.
    pub fn to_utxo(&self) -> Result<Utxo, MarketError> {
        let script = base64::engine::general_purpose::STANDARD
            .decode(&self.script)
            .map_err(|e| MarketError::MalformedScript(format!("txo script: {}", e)))?;
        Ok(Utxo {
            txid: self.txid.clone(),
            vout: self.vout,
            satoshis: self.satoshis,
            script: Script::from_bytes(&script),
        })
    }

    /// Convert to a [`Listing`], taking the displayed price from the
    /// indexer when it reports one.
    pub fn to_listing(&self, network: Network) -> Result<Listing, MarketError> {
        let mut listing = Listing::from_utxo(&self.to_utxo()?, network)?;
        if let Some(list) = self.data.as_ref().and_then(|d| d.list.as_ref()) {
            listing.price_satoshis = list.price;
        }
        Ok(listing)
    }
}
