//! bsv-20 / bsv-21 token inscriptions.
//!
//! Token operations are JSON documents inscribed with content type
//! `application/bsv-20`. Every number is a decimal string. bsv-20 tokens are
//! addressed by `tick`; bsv-21 tokens by `id`, the outpoint of their
//! `deploy+mint` inscription.

use serde::{Deserialize, Serialize};

use crate::{Inscription, ScriptError};

/// Content type shared by both token protocols.
pub const TOKEN_CONTENT_TYPE: &str = "application/bsv-20";

const PROTOCOL: &str = "bsv-20";

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Deploy {
    pub tick: String,
    pub max: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Mint {
    pub tick: String,
    pub amt: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DeployMint {
    pub sym: String,
    pub amt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Transfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amt: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(tag = "op")]
pub enum TokenOp {
    #[serde(rename = "deploy")]
    Deploy(Deploy),

    #[serde(rename = "mint")]
    Mint(Mint),

    #[serde(rename = "deploy+mint")]
    DeployMint(DeployMint),

    #[serde(rename = "transfer")]
    Transfer(Transfer),
}

/// A complete token inscription document.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct TokenInscription {
    pub p: String,
    #[serde(flatten)]
    pub op: TokenOp,
}

impl TokenInscription {
    fn with_op(op: TokenOp) -> Self {
        TokenInscription {
            p: PROTOCOL.to_string(),
            op,
        }
    }

    /// bsv-20 deploy of `tick` with a total supply and optional per-mint limit.
    pub fn deploy(tick: &str, max: u64, lim: Option<u64>, dec: Option<u8>) -> Self {
        Self::with_op(TokenOp::Deploy(Deploy {
            tick: tick.to_string(),
            max: max.to_string(),
            lim: lim.map(|v| v.to_string()),
            dec: dec.map(|v| v.to_string()),
        }))
    }

    /// bsv-20 mint of `amt` units of `tick`.
    pub fn mint(tick: &str, amt: u64) -> Self {
        Self::with_op(TokenOp::Mint(Mint {
            tick: tick.to_string(),
            amt: amt.to_string(),
        }))
    }

    /// bsv-21 deploy with the whole supply minted to the deployer.
    pub fn deploy_mint(sym: &str, amt: u64, dec: Option<u8>, icon: Option<&str>) -> Self {
        Self::with_op(TokenOp::DeployMint(DeployMint {
            sym: sym.to_string(),
            amt: amt.to_string(),
            dec: dec.map(|v| v.to_string()),
            icon: icon.map(str::to_string),
        }))
    }

    /// bsv-20 transfer inscription addressed by ticker.
    pub fn transfer_tick(tick: &str, amt: u64) -> Self {
        Self::with_op(TokenOp::Transfer(Transfer {
            tick: Some(tick.to_string()),
            id: None,
            amt: amt.to_string(),
        }))
    }

    /// bsv-21 transfer inscription addressed by token id.
    pub fn transfer_id(id: &str, amt: u64) -> Self {
        Self::with_op(TokenOp::Transfer(Transfer {
            tick: None,
            id: Some(id.to_string()),
            amt: amt.to_string(),
        }))
    }

    /// The token this document refers to: `tick`, `sym` or `id`.
    pub fn token_key(&self) -> Option<&str> {
        match &self.op {
            TokenOp::Deploy(d) => Some(&d.tick),
            TokenOp::Mint(m) => Some(&m.tick),
            TokenOp::DeployMint(d) => Some(&d.sym),
            TokenOp::Transfer(t) => t.tick.as_deref().or(t.id.as_deref()),
        }
    }

    /// Amount carried by mint, deploy+mint and transfer documents.
    pub fn amount(&self) -> Result<Option<u64>, ScriptError> {
        let amt = match &self.op {
            TokenOp::Mint(m) => &m.amt,
            TokenOp::DeployMint(d) => &d.amt,
            TokenOp::Transfer(t) => &t.amt,
            TokenOp::Deploy(_) => return Ok(None),
        };
        amt.parse::<u64>()
            .map(Some)
            .map_err(|_| ScriptError::InvalidToken(format!("bad amount '{}'", amt)))
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wrap the JSON document as an inscription.
    pub fn to_inscription(&self) -> Result<Inscription, ScriptError> {
        Ok(Inscription::new(TOKEN_CONTENT_TYPE, self.to_json()?.into_bytes()))
    }

    /// Read a token document from an inscription.
    ///
    /// Returns `Ok(None)` for non-token content types.
    pub fn from_inscription(inscription: &Inscription) -> Result<Option<Self>, ScriptError> {
        if inscription.content_type != TOKEN_CONTENT_TYPE {
            return Ok(None);
        }
        let doc: TokenInscription = serde_json::from_slice(&inscription.payload)?;
        if doc.p != PROTOCOL {
            return Err(ScriptError::InvalidToken(format!("unknown protocol '{}'", doc.p)));
        }
        Ok(Some(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_json() {
        let doc = TokenInscription::deploy("ORDI", 21_000_000, Some(1000), None);
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"p":"bsv-20","op":"deploy","tick":"ORDI","max":"21000000","lim":"1000"}"#
        );
    }

    #[test]
    fn test_transfer_json_by_id() {
        let doc = TokenInscription::transfer_id("abcd_0", 500);
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"p":"bsv-20","op":"transfer","id":"abcd_0","amt":"500"}"#
        );
        assert_eq!(doc.token_key(), Some("abcd_0"));
    }

    #[test]
    fn test_deploy_mint_json() {
        let doc = TokenInscription::deploy_mint("PEPE", 1_000, Some(2), None);
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"p":"bsv-20","op":"deploy+mint","sym":"PEPE","amt":"1000","dec":"2"}"#
        );
    }

    #[test]
    fn test_inscription_roundtrip() {
        let doc = TokenInscription::mint("ORDI", 1000);
        let ins = doc.to_inscription().unwrap();
        assert_eq!(ins.content_type, TOKEN_CONTENT_TYPE);
        let back = TokenInscription::from_inscription(&ins).unwrap().unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.amount().unwrap(), Some(1000));
    }

    #[test]
    fn test_non_token_content_is_ignored() {
        let ins = Inscription::new("text/plain", b"{}".to_vec());
        assert_eq!(TokenInscription::from_inscription(&ins).unwrap(), None);
    }

    #[test]
    fn test_bad_amount() {
        let json = r#"{"p":"bsv-20","op":"transfer","tick":"ORDI","amt":"lots"}"#;
        let ins = Inscription::new(TOKEN_CONTENT_TYPE, json.as_bytes().to_vec());
        let doc = TokenInscription::from_inscription(&ins).unwrap().unwrap();
        assert!(doc.amount().is_err());
    }
}
