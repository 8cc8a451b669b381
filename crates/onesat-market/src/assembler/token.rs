use onesat_script::Address;
use onesat_transaction::{InputRole, TransactionOutput};

use super::list::token_lock;
use super::{check_owner, pending, Draft, Funding, Sale, TransactionAssembler};
use crate::keys::KeyManager;
use crate::types::{PendingTransaction, TokenAction, TokenUtxo, Utxo};
use crate::MarketError;

impl TransactionAssembler {
    /// Inscribe a token operation to `recipient`.
    ///
    /// Deploy, mint and deploy+mint create a single inscription output and
    /// spend only funding. A transfer spends matching token UTXOs from
    /// `tokens` (largest first, each signed `AssetRelease` by the ordinal
    /// key) until they cover the amount, and re-inscribes any surplus to
    /// the ordinal address as output #1.
    pub fn token_action(
        &self,
        ordinal: &KeyManager,
        payment: &KeyManager,
        action: &TokenAction,
        tokens: &[TokenUtxo],
        recipient: &Address,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        let sats = self.config.ordinal_output_sats;
        let mut draft = Draft::new();

        match action {
            TokenAction::Transfer {
                protocol,
                token,
                amount,
            } => {
                let mut held: Vec<&TokenUtxo> = tokens
                    .iter()
                    .filter(|t| t.protocol == *protocol && t.tick_or_id == *token)
                    .collect();
                held.sort_by(|a, b| b.amt.cmp(&a.amt).then_with(|| a.utxo.txid.cmp(&b.utxo.txid)));

                let mut spent = 0u64;
                let mut used = 0;
                for utxo in &held {
                    if used > 0 && spent >= *amount {
                        break;
                    }
                    check_owner(&utxo.utxo.script, ordinal)?;
                    draft.add_utxo(&utxo.utxo, InputRole::AssetRelease, ordinal)?;
                    spent = spent
                        .checked_add(utxo.amt)
                        .ok_or_else(|| {
                            MarketError::MalformedScript("token amounts overflow u64".to_string())
                        })?;
                    used += 1;
                }
                let kind = match held.first() {
                    Some(kind) if spent >= *amount => *kind,
                    _ => {
                        return Err(MarketError::InsufficientTokens {
                            needed: *amount,
                            available: spent,
                        })
                    }
                };
                tracing::debug!(token = %token, amount, spent, inputs = used, "token transfer");

                draft.add_output(TransactionOutput::new(
                    sats,
                    token_lock(kind, *amount, &recipient.locking_script())?,
                ));
                if spent > *amount {
                    draft.add_output(TransactionOutput::new(
                        sats,
                        token_lock(kind, spent - *amount, &ordinal.locking_script())?,
                    ));
                }
            }
            _ => {
                let inscription = action.to_document().to_inscription()?;
                tracing::debug!(op = ?action, "token inscription");
                draft.add_output(TransactionOutput::new(
                    sats,
                    inscription.lock(&recipient.locking_script())?,
                ));
            }
        }

        let first_funding = draft.tx.inputs.len();
        self.fund(&mut draft, funding, Funding::Select, payment, false)?;
        let tx = draft.sign()?;
        pending(&tx, first_funding, Sale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::types::TokenProtocol;
    use onesat_script::token::TokenInscription;
    use onesat_script::Inscription;
    use onesat_transaction::Transaction;

    fn token(n: u8, owner: &KeyManager, amt: u64) -> TokenUtxo {
        let script = TokenInscription::transfer_tick("PEPE", amt)
            .to_inscription()
            .unwrap()
            .lock(&owner.locking_script())
            .unwrap();
        TokenUtxo::from_utxo(utxo(n, 1, script)).unwrap()
    }

    fn amount_of(tx: &Transaction, index: usize) -> u64 {
        let ins = Inscription::parse(&tx.outputs[index].locking_script).unwrap().unwrap();
        TokenInscription::from_inscription(&ins)
            .unwrap()
            .unwrap()
            .amount()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_deploy() {
        let (payment, ordinal) = keys();
        let action = TokenAction::Deploy {
            tick: "PEPE".to_string(),
            max_supply: 21_000_000,
            mint_limit: Some(1_000),
            decimals: None,
        };
        let funding = vec![utxo(1, 5_000, payment.locking_script())];
        let pending = assembler()
            .token_action(&ordinal, &payment, &action, &[], &ordinal.address(), &funding)
            .unwrap();
        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        let ins = Inscription::parse(&tx.outputs[0].locking_script).unwrap().unwrap();
        assert_eq!(ins.content_type, "application/bsv-20");
        assert_eq!(
            String::from_utf8(ins.payload).unwrap(),
            r#"{"p":"bsv-20","op":"deploy","tick":"PEPE","max":"21000000","lim":"1000"}"#
        );
        assert_eq!(pending.input_txid, funding[0].txid);
    }

    #[test]
    fn test_transfer_spends_largest_first() {
        let (payment, ordinal) = keys();
        let recipient = KeyManager::generate(ordinal.network());
        let tokens = vec![token(1, &ordinal, 100), token(2, &ordinal, 400), token(3, &ordinal, 300)];
        let action = TokenAction::Transfer {
            protocol: TokenProtocol::Bsv20,
            token: "PEPE".to_string(),
            amount: 600,
        };
        let funding = vec![utxo(9, 5_000, payment.locking_script())];
        let pending = assembler()
            .token_action(&ordinal, &payment, &action, &tokens, &recipient.address(), &funding)
            .unwrap();
        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        assert_eq!(pending.num_inputs, 3);
        assert_eq!(amount_of(&tx, 0), 600);
        assert_eq!(amount_of(&tx, 1), 100);
        assert_eq!(pending.input_txid, funding[0].txid);

        let signer = |i: usize| {
            let chunks = tx.inputs[i].unlocking_script.as_ref().unwrap().chunks().unwrap();
            let sig = chunks[0].data.clone().unwrap();
            (*sig.last().unwrap(), chunks[1].data.clone().unwrap())
        };
        let ordinal_pub = ordinal.public_key().to_compressed().to_vec();
        let payment_pub = payment.public_key().to_compressed().to_vec();
        assert_eq!(signer(0), (0xc2, ordinal_pub.clone()));
        assert_eq!(signer(1), (0xc2, ordinal_pub));
        assert_eq!(signer(2), (0x41, payment_pub));
    }

    #[test]
    fn test_transfer_exact_has_no_change_inscription() {
        let (payment, ordinal) = keys();
        let tokens = vec![token(1, &ordinal, 500)];
        let action = TokenAction::Transfer {
            protocol: TokenProtocol::Bsv20,
            token: "PEPE".to_string(),
            amount: 500,
        };
        let funding = vec![utxo(9, 5_000, payment.locking_script())];
        let pending = assembler()
            .token_action(&ordinal, &payment, &action, &tokens, &payment.address(), &funding)
            .unwrap();
        let tx = Transaction::from_hex(&pending.raw_tx_hex).unwrap();
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.outputs[1].locking_script, payment.locking_script());
    }

    #[test]
    fn test_transfer_short() {
        let (payment, ordinal) = keys();
        let tokens = vec![token(1, &ordinal, 100)];
        let action = TokenAction::Transfer {
            protocol: TokenProtocol::Bsv20,
            token: "PEPE".to_string(),
            amount: 101,
        };
        assert!(matches!(
            assembler().token_action(&ordinal, &payment, &action, &tokens, &ordinal.address(), &[]),
            Err(MarketError::InsufficientTokens { needed: 101, available: 100 })
        ));
    }

    #[test]
    fn test_transfer_of_foreign_tokens() {
        let (payment, ordinal) = keys();
        let tokens = vec![token(1, &payment, 100)];
        let action = TokenAction::Transfer {
            protocol: TokenProtocol::Bsv20,
            token: "PEPE".to_string(),
            amount: 50,
        };
        assert!(matches!(
            assembler().token_action(&ordinal, &payment, &action, &tokens, &ordinal.address(), &[]),
            Err(MarketError::NotListingOwner)
        ));
    }
}
