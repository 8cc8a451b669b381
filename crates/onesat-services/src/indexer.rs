//! HTTP client for an ordinals indexer.
//!
//! Paths, relative to `base_url`:
//!
//! | Query                | Path                                   |
//! |----------------------|----------------------------------------|
//! | funding UTXOs        | `GET /txos/address/{address}/unspent?funding=true` |
//! | artifact UTXOs       | `GET /txos/address/{address}/unspent?bsv20=false`  |
//! | one output           | `GET /txos/{txid_vout}`                |
//! | token UTXOs          | `GET /bsv20/{address}/tick/{tick_or_id}` |
//!
//! Every endpoint answers with [`Txo`] objects.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;

use onesat_market::{Listing, MarketError, TokenUtxo, Utxo};
use onesat_script::Address;
use onesat_transaction::Outpoint;

use crate::error::ServiceError;
use crate::traits::UtxoQuery;
use crate::types::{IndexerConfig, Txo};

/// HTTP client for the indexer API.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    /// Client configuration.
    config: IndexerConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl IndexerClient {
    /// Create a new indexer client with the given configuration.
    pub fn new(config: IndexerConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Raw indexer outputs for `path`.
    pub async fn txos(&self, path: &str) -> Result<Vec<Txo>, ServiceError> {
        self.do_request(path).await
    }

    /// Perform a GET request to the indexer and deserialize the response.
    async fn do_request<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "indexer request");

        let resp = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await?;

        let status = resp.status();

        if status.as_u16() == 404 {
            return Err(ServiceError::NotFound);
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ServiceError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let parsed = serde_json::from_str(&text)?;
        Ok(parsed)
    }

    /// Build common headers from config.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(ref key) = self.config.api_key {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {key}")) {
                headers.insert(AUTHORIZATION, val);
            }
        }

        headers
    }
}

fn to_utxos(txos: Vec<Txo>) -> Result<Vec<Utxo>, MarketError> {
    txos.iter().map(Txo::to_utxo).collect()
}

impl UtxoQuery for IndexerClient {
    async fn funding_utxos(&self, address: &Address) -> Result<Vec<Utxo>, ServiceError> {
        let path = format!("txos/address/{}/unspent?funding=true", address);
        let utxos = to_utxos(self.txos(&path).await?)?;
        // One-satoshi outputs may carry an artifact and are never spent as funding.
        Ok(utxos.into_iter().filter(|u| u.satoshis > 1).collect())
    }

    async fn ordinal_utxos(&self, address: &Address) -> Result<Vec<Utxo>, ServiceError> {
        let path = format!("txos/address/{}/unspent?bsv20=false", address);
        let utxos = to_utxos(self.txos(&path).await?)?;
        Ok(utxos.into_iter().filter(|u| u.satoshis == 1).collect())
    }

    async fn utxo(&self, outpoint: &Outpoint) -> Result<Utxo, ServiceError> {
        let txo: Txo = self.do_request(&format!("txos/{}", outpoint)).await?;
        Ok(txo.to_utxo()?)
    }

    async fn listing(&self, outpoint: &Outpoint) -> Result<Listing, ServiceError> {
        let txo: Txo = self.do_request(&format!("txos/{}", outpoint)).await?;
        Ok(txo.to_listing(self.config.network)?)
    }

    async fn token_utxos(
        &self,
        address: &Address,
        tick_or_id: &str,
    ) -> Result<Vec<TokenUtxo>, ServiceError> {
        let path = format!("bsv20/{}/tick/{}", address, tick_or_id);
        let tokens = to_utxos(self.txos(&path).await?)?
            .into_iter()
            .map(TokenUtxo::from_utxo)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tokens)
    }
}
