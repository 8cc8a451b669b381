//! ARC broadcaster.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use onesat_market::BroadcastOutcome;

use crate::error::ServiceError;
use crate::traits::Broadcaster;
use crate::types::{ArcResponse, BroadcastConfig};

/// HTTP client submitting transactions to an ARC endpoint.
#[derive(Debug, Clone)]
pub struct ArcBroadcaster {
    /// Client configuration.
    config: BroadcastConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl ArcBroadcaster {
    /// Create a new broadcaster with the given configuration.
    pub fn new(config: BroadcastConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// POST `raw_tx_hex` to `/tx` and return ARC's answer as is.
    ///
    /// ARC answers rejections with a 4xx status and a JSON body; those are
    /// returned as responses. Only non-JSON failures are errors.
    pub async fn submit_raw(&self, raw_tx_hex: &str) -> Result<ArcResponse, ServiceError> {
        let url = format!("{}/tx", self.config.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&serde_json::json!({ "rawTx": raw_tx_hex }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        match serde_json::from_str::<ArcResponse>(&text) {
            Ok(mut response) => {
                if !status.is_success() && response.status.is_none() {
                    response.status = Some(status.as_u16() as i32);
                }
                if !status.is_success() && response.tx_status.is_none() {
                    response.tx_status = Some("REJECTED".to_string());
                }
                Ok(response)
            }
            Err(_) if !status.is_success() => Err(ServiceError::ServerError {
                status_code: status.as_u16(),
                message: text,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Query the status of a transaction by txid.
    pub async fn status(&self, txid: &str) -> Result<ArcResponse, ServiceError> {
        let url = format!("{}/tx/{}", self.config.base_url.trim_end_matches('/'), txid);
        let resp = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Err(ServiceError::NotFound);
        }
        Ok(resp.json().await?)
    }

    /// Build common headers from config.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(ref key) = self.config.api_key {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {key}")) {
                headers.insert(AUTHORIZATION, val);
            }
        }

        if let Some(ref status) = self.config.wait_for_status {
            if let Ok(val) = HeaderValue::from_str(&status.as_code().to_string()) {
                headers.insert("X-WaitForStatus", val);
            }
        }

        headers
    }
}

impl Broadcaster for ArcBroadcaster {
    async fn broadcast(&self, raw_tx_hex: &str) -> Result<BroadcastOutcome, ServiceError> {
        let response = self.submit_raw(raw_tx_hex).await?;
        if response.is_rejected() {
            return Ok(BroadcastOutcome::Rejected {
                code: response.status.unwrap_or(0),
                reason: response.reason(),
            });
        }
        Ok(BroadcastOutcome::Accepted {
            txid: response.txid,
        })
    }
}
