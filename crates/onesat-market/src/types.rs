//! Boundary types exchanged with the indexer, the UI and the broadcaster.

use serde::{Deserialize, Serialize};

use onesat_script::ordlock::{OrdLockData, Payout};
use onesat_script::token::{TokenInscription, TokenOp, Transfer};
use onesat_script::{Inscription, Script};
use onesat_transaction::{Outpoint, TransactionInput, TransactionOutput};

use crate::MarketError;

// ---- UTXOs ----

/// A spendable output as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    /// Display-order transaction id.
    pub txid: String,
    pub vout: u32,
    pub satoshis: u64,
    /// Locking script of the output, hex.
    pub script: Script,
}

impl Utxo {
    pub fn outpoint(&self) -> Result<Outpoint, MarketError> {
        Outpoint::from_txid_hex(&self.txid, self.vout)
            .map_err(|e| MarketError::MalformedScript(e.to_string()))
    }

    /// An unsigned input spending this output.
    pub fn to_input(&self) -> Result<TransactionInput, MarketError> {
        Ok(TransactionInput::spending(
            &self.outpoint()?,
            TransactionOutput::new(self.satoshis, self.script.clone()),
        ))
    }
}

/// A token-carrying UTXO with its decoded balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUtxo {
    #[serde(flatten)]
    pub utxo: Utxo,
    pub protocol: TokenProtocol,
    /// `tick` for bsv-20 tokens, `id` for bsv-21.
    pub tick_or_id: String,
    #[serde(with = "string_amount")]
    pub amt: u64,
}

impl TokenUtxo {
    /// Read a token UTXO from its inscription.
    ///
    /// Fails with `MalformedScript` when the script carries no token
    /// inscription with an amount.
    pub fn from_utxo(utxo: Utxo) -> Result<Self, MarketError> {
        let inscription = Inscription::parse(&utxo.script)
            .map_err(MarketError::malformed)?
            .ok_or_else(|| MarketError::MalformedScript("no inscription".to_string()))?;
        let doc = TokenInscription::from_inscription(&inscription)
            .map_err(MarketError::malformed)?
            .ok_or_else(|| MarketError::MalformedScript("not a token inscription".to_string()))?;
        let amt = doc
            .amount()
            .map_err(MarketError::malformed)?
            .ok_or_else(|| MarketError::MalformedScript("token inscription has no amount".to_string()))?;
        let (protocol, tick_or_id) = match &doc.op {
            // A bsv-21 token is named after the output that deployed it.
            TokenOp::DeployMint(_) => (TokenProtocol::Bsv21, utxo.outpoint()?.to_string()),
            TokenOp::Transfer(Transfer { id: Some(id), .. }) => (TokenProtocol::Bsv21, id.clone()),
            _ => {
                let tick = doc.token_key().ok_or_else(|| {
                    MarketError::MalformedScript("token has no tick".to_string())
                })?;
                (TokenProtocol::Bsv20, tick.to_string())
            }
        };
        Ok(TokenUtxo {
            utxo,
            protocol,
            tick_or_id,
            amt,
        })
    }
}

// ---- Listings ----

fn default_listing_sats() -> u64 {
    1
}

/// An artifact locked under the OrdinalLock covenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub outpoint: Outpoint,
    /// Value of the listed output.
    #[serde(default = "default_listing_sats")]
    pub satoshis: u64,
    /// The full OrdinalLock locking script.
    pub ordinal_script: Script,
    /// The serialized payout output (value and script) the covenant embeds.
    #[serde(with = "hex_bytes")]
    pub payout: Vec<u8>,
    pub price_satoshis: u64,
    pub seller_owner_address: String,
}

impl Listing {
    /// Build a listing from the listed UTXO alone.
    pub fn from_utxo(utxo: &Utxo, network: onesat_primitives::Network) -> Result<Self, MarketError> {
        let data = OrdLockData::decode(&utxo.script).map_err(MarketError::malformed)?;
        let seller = data.seller_address(network).map_err(MarketError::malformed)?;
        Ok(Listing {
            outpoint: utxo.outpoint()?,
            satoshis: utxo.satoshis,
            ordinal_script: utxo.script.clone(),
            payout: data.payout.to_bytes(),
            price_satoshis: data.price(),
            seller_owner_address: seller.address_string,
        })
    }

    /// Decode the covenant and check it agrees with the stored payout.
    ///
    /// Fails with `MalformedScript` when the script does not decode, the
    /// payout does not pay a P2PKH, or the stored payout bytes disagree with
    /// the script. The price is left to the caller to compare.
    pub fn ord_lock(&self) -> Result<OrdLockData, MarketError> {
        let data = OrdLockData::decode(&self.ordinal_script).map_err(MarketError::malformed)?;
        if !data.payout.locking_script.is_p2pkh() {
            return Err(MarketError::MalformedScript(
                "listing payout is not P2PKH".to_string(),
            ));
        }
        if data.payout.to_bytes() != self.payout {
            return Err(MarketError::MalformedScript(
                "stored payout differs from the covenant".to_string(),
            ));
        }
        Ok(data)
    }

    /// The payout output as stored with the listing.
    pub fn payout_output(&self) -> Result<Payout, MarketError> {
        Ok(Payout::from_bytes(&self.payout)?)
    }
}

// ---- Tokens ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenProtocol {
    Bsv20,
    Bsv21,
}

/// A token operation to inscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum TokenAction {
    /// bsv-20 deploy.
    #[serde(rename_all = "camelCase")]
    Deploy {
        tick: String,
        max_supply: u64,
        mint_limit: Option<u64>,
        decimals: Option<u8>,
    },
    /// bsv-20 mint against an existing deploy.
    Mint { tick: String, amount: u64 },
    /// bsv-21 deploy with the full supply minted to the deployer.
    #[serde(rename = "deploy+mint")]
    DeployMint {
        symbol: String,
        amount: u64,
        decimals: Option<u8>,
        icon: Option<String>,
    },
    /// Move `amount` units; `token` is the tick (bsv-20) or id (bsv-21).
    Transfer {
        protocol: TokenProtocol,
        token: String,
        amount: u64,
    },
}

impl TokenAction {
    /// The inscription document for this action.
    pub fn to_document(&self) -> TokenInscription {
        match self {
            TokenAction::Deploy {
                tick,
                max_supply,
                mint_limit,
                decimals,
            } => TokenInscription::deploy(tick, *max_supply, *mint_limit, *decimals),
            TokenAction::Mint { tick, amount } => TokenInscription::mint(tick, *amount),
            TokenAction::DeployMint {
                symbol,
                amount,
                decimals,
                icon,
            } => TokenInscription::deploy_mint(symbol, *amount, *decimals, icon.as_deref()),
            TokenAction::Transfer {
                protocol,
                token,
                amount,
            } => transfer_document(*protocol, token, *amount),
        }
    }
}

/// A transfer inscription of `amount` units of `token`.
pub fn transfer_document(protocol: TokenProtocol, token: &str, amount: u64) -> TokenInscription {
    match protocol {
        TokenProtocol::Bsv20 => TokenInscription::transfer_tick(token, amount),
        TokenProtocol::Bsv21 => TokenInscription::transfer_id(token, amount),
    }
}

// ---- Results ----

/// A finished transaction awaiting review and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    pub raw_tx_hex: String,
    pub txid: String,
    pub size_bytes: usize,
    pub fee_satoshis: u64,
    pub num_inputs: usize,
    pub num_outputs: usize,
    /// Txid of the primary funding input.
    pub input_txid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_fee_satoshis: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_satoshis: Option<u64>,
    /// Every outpoint this transaction spends.
    pub spent_outpoints: Vec<Outpoint>,
}

/// What the broadcast sink reported for a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BroadcastOutcome {
    Accepted { txid: String },
    Rejected { code: i32, reason: String },
}

impl BroadcastOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BroadcastOutcome::Accepted { .. })
    }
}

// ---- serde helpers ----

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

/// Token amounts travel as decimal strings.
mod string_amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onesat_primitives::Network;
    use onesat_script::Address;

    const TXID: &str = "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2";

    fn listed_utxo(price: u64) -> Utxo {
        let seller = Address::from_public_key_hash(&[0x22; 20], Network::Mainnet);
        let data = OrdLockData::new([0x11; 20], Payout::to_address(&seller, price));
        Utxo {
            txid: TXID.to_string(),
            vout: 0,
            satoshis: 1,
            script: data.lock().unwrap(),
        }
    }

    #[test]
    fn test_utxo_json_shape() {
        let utxo = Utxo {
            txid: TXID.to_string(),
            vout: 2,
            satoshis: 500,
            script: Script::p2pkh(&[1; 20]),
        };
        let json = serde_json::to_value(&utxo).unwrap();
        assert_eq!(json["txid"], TXID);
        assert_eq!(json["script"], Script::p2pkh(&[1; 20]).to_hex());
        assert_eq!(utxo.outpoint().unwrap().to_string(), format!("{}_2", TXID));
    }

    #[test]
    fn test_bad_txid_is_malformed() {
        let utxo = Utxo {
            txid: "xyz".to_string(),
            vout: 0,
            satoshis: 1,
            script: Script::new(),
        };
        assert!(matches!(utxo.outpoint(), Err(MarketError::MalformedScript(_))));
    }

    #[test]
    fn test_listing_from_utxo() {
        let listing = Listing::from_utxo(&listed_utxo(100_000), Network::Mainnet).unwrap();
        assert_eq!(listing.price_satoshis, 100_000);
        assert_eq!(listing.ord_lock().unwrap().owner_pkh, [0x11; 20]);
        assert_eq!(listing.payout_output().unwrap().satoshis, 100_000);
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("\"priceSatoshis\":100000"));
        assert_eq!(serde_json::from_str::<Listing>(&json).unwrap(), listing);
    }

    #[test]
    fn test_listing_rejects_tampered_payout() {
        let mut listing = Listing::from_utxo(&listed_utxo(100_000), Network::Mainnet).unwrap();
        listing.payout[0] ^= 1;
        assert!(matches!(listing.ord_lock(), Err(MarketError::MalformedScript(_))));
    }

    #[test]
    fn test_listing_from_plain_utxo_is_malformed() {
        let utxo = Utxo {
            txid: TXID.to_string(),
            vout: 0,
            satoshis: 1,
            script: Script::p2pkh(&[3; 20]),
        };
        assert!(matches!(
            Listing::from_utxo(&utxo, Network::Mainnet),
            Err(MarketError::MalformedScript(_))
        ));
    }

    #[test]
    fn test_token_utxo_from_inscription() {
        let ins = TokenInscription::transfer_tick("PEPE", 700).to_inscription().unwrap();
        let utxo = Utxo {
            txid: TXID.to_string(),
            vout: 1,
            satoshis: 1,
            script: ins.lock(&Script::p2pkh(&[4; 20])).unwrap(),
        };
        let token = TokenUtxo::from_utxo(utxo).unwrap();
        assert_eq!(token.amt, 700);
        assert_eq!(token.tick_or_id, "PEPE");
        assert_eq!(token.protocol, TokenProtocol::Bsv20);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["amt"], "700");
        assert_eq!(json["tickOrId"], "PEPE");
    }

    #[test]
    fn test_deploy_mint_utxo_is_named_by_outpoint() {
        let ins = TokenInscription::deploy_mint("PEPE", 1_000, None, None)
            .to_inscription()
            .unwrap();
        let utxo = Utxo {
            txid: TXID.to_string(),
            vout: 0,
            satoshis: 1,
            script: ins.lock(&Script::p2pkh(&[4; 20])).unwrap(),
        };
        let token = TokenUtxo::from_utxo(utxo).unwrap();
        assert_eq!(token.protocol, TokenProtocol::Bsv21);
        assert_eq!(token.tick_or_id, format!("{}_0", TXID));
    }

    #[test]
    fn test_token_action_json() {
        let action: TokenAction = serde_json::from_str(
            r#"{"op":"transfer","protocol":"bsv21","token":"abc_0","amount":5}"#,
        )
        .unwrap();
        assert_eq!(
            action.to_document().to_json().unwrap(),
            r#"{"p":"bsv-20","op":"transfer","id":"abc_0","amt":"5"}"#
        );
    }

    #[test]
    fn test_broadcast_outcome_json() {
        let outcome = BroadcastOutcome::Rejected {
            code: 465,
            reason: "fee too low".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert!(!outcome.is_accepted());
    }
}
