//! Transaction flows.
//!
//! Each flow builds a [`Draft`]: the unsigned transaction plus, for every
//! input, the [`InputRole`] it is signed under and the key that signs it.
//! Signing, the fee check and the [`PendingTransaction`] summary are shared
//! by all flows.

mod buy;
mod cancel;
mod inscribe;
mod list;
mod token;
mod transfer;

pub use buy::PurchaseDraft;
pub use transfer::SendAmount;

use onesat_script::{Inscription, Script};
use onesat_transaction::template::{ordlock, p2pkh, UnlockingScriptTemplate};
use onesat_transaction::{InputRole, Transaction, TransactionInput, TransactionOutput};

use crate::config::MarketConfig;
use crate::keys::KeyManager;
use crate::selector::{largest, select};
use crate::types::{PendingTransaction, Utxo};
use crate::MarketError;

/// Builds and signs marketplace transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionAssembler {
    config: MarketConfig,
}

impl TransactionAssembler {
    pub fn new(config: MarketConfig) -> Self {
        TransactionAssembler { config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Add funding inputs and a change output to `draft`.
    ///
    /// The change output pays `payer` whatever is left after the miner fee;
    /// it is dropped when nothing is left unless `keep_empty_change` is set.
    /// Returns the miner fee.
    pub(crate) fn fund<'k>(
        &self,
        draft: &mut Draft<'k>,
        funding: &[Utxo],
        strategy: Funding,
        payer: &'k KeyManager,
        keep_empty_change: bool,
    ) -> Result<u64, MarketError> {
        let rate = self.config.fee_rate();
        draft.add_output(TransactionOutput::new(0, payer.locking_script()));
        let change_index = draft.tx.outputs.len() - 1;

        let fixed_in = draft.tx.total_input_satoshis()?;
        let out = draft.tx.total_output_satoshis()?;
        let chosen: Vec<Utxo> = match strategy {
            Funding::Largest => vec![largest(funding)?.clone()],
            Funding::Select => {
                select(funding, out.saturating_sub(fixed_in), draft.tx.estimated_size(), rate)?
                    .chosen
            }
        };
        for utxo in &chosen {
            draft.add_utxo(utxo, InputRole::Payment, payer)?;
        }

        let fee = rate.fee_for(draft.tx.estimated_size() as u64);
        let available = draft.tx.total_input_satoshis()?;
        let needed = out.checked_add(fee).ok_or(MarketError::InsufficientFunds {
            needed: u64::MAX,
            available,
        })?;
        if available < needed {
            return Err(MarketError::InsufficientFunds { needed, available });
        }

        let change = available - needed;
        if change == 0 && !keep_empty_change {
            draft.tx.outputs.remove(change_index);
        } else {
            draft.tx.outputs[change_index].satoshis = change;
        }
        tracing::debug!(inputs = chosen.len(), fee, change, "funding added");
        Ok(fee)
    }
}

/// How funding UTXOs are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Funding {
    /// The single highest-value UTXO.
    Largest,
    /// Greedy largest-first until the outputs and fee are covered.
    Select,
}

/// An unsigned transaction and the signing plan for each of its inputs.
pub(crate) struct Draft<'k> {
    pub(crate) tx: Transaction,
    plan: Vec<(InputRole, Option<&'k KeyManager>)>,
}

impl<'k> Draft<'k> {
    pub(crate) fn new() -> Self {
        Draft {
            tx: Transaction::new(),
            plan: Vec::new(),
        }
    }

    /// Spend `utxo` under `role`, signed by `key`.
    pub(crate) fn add_utxo(
        &mut self,
        utxo: &Utxo,
        role: InputRole,
        key: &'k KeyManager,
    ) -> Result<(), MarketError> {
        self.add_input(utxo.to_input()?, role, Some(key));
        Ok(())
    }

    pub(crate) fn add_input(
        &mut self,
        input: TransactionInput,
        role: InputRole,
        key: Option<&'k KeyManager>,
    ) {
        self.tx.add_input(input);
        self.plan.push((role, key));
    }

    pub(crate) fn add_output(&mut self, output: TransactionOutput) {
        self.tx.add_output(output);
    }

    /// Produce the unlocking script of input `index` from its plan entry.
    pub(crate) fn sign_input(&mut self, index: usize) -> Result<(), MarketError> {
        let (role, key) = self.plan.get(index).copied().ok_or_else(|| {
            MarketError::Transaction(onesat_transaction::TransactionError::SigningError(format!(
                "no signing plan for input {}",
                index
            )))
        })?;
        let template: Box<dyn UnlockingScriptTemplate> = if !role.requires_signature() {
            Box::new(ordlock::purchase())
        } else {
            let key = key.ok_or_else(|| {
                MarketError::Transaction(onesat_transaction::TransactionError::SigningError(
                    format!("input {} needs a key", index),
                ))
            })?;
            match role {
                InputRole::ListingCancel => Box::new(ordlock::cancel(key.private_key().clone())),
                _ => Box::new(p2pkh::unlock(key.private_key().clone(), role)),
            }
        };
        self.tx.sign_input(index, template.as_ref())?;
        Ok(())
    }

    /// Sign every input and reject transactions that create value.
    pub(crate) fn sign(mut self) -> Result<Transaction, MarketError> {
        for index in 0..self.plan.len() {
            self.sign_input(index)?;
        }
        let inputs = self.tx.total_input_satoshis()?;
        let outputs = self.tx.total_output_satoshis()?;
        if inputs < outputs {
            return Err(MarketError::FeeInadequate { inputs, outputs });
        }
        Ok(self.tx)
    }
}

/// Extra figures reported with a purchase.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Sale {
    pub market_fee: Option<u64>,
    pub price: Option<u64>,
}

/// Summarise a signed transaction. `primary` is the index of the input
/// whose txid is reported as `input_txid`.
pub(crate) fn pending(
    tx: &Transaction,
    primary: usize,
    sale: Sale,
) -> Result<PendingTransaction, MarketError> {
    let inputs = tx.total_input_satoshis()?;
    let fee = inputs.saturating_sub(tx.total_output_satoshis()?);
    let input_txid = tx
        .inputs
        .get(primary)
        .map(|input| input.outpoint().txid_hex())
        .ok_or(MarketError::NoFundingUtxo)?;
    let pending = PendingTransaction {
        raw_tx_hex: tx.to_hex(),
        txid: tx.tx_id_hex(),
        size_bytes: tx.size(),
        fee_satoshis: fee,
        num_inputs: tx.inputs.len(),
        num_outputs: tx.outputs.len(),
        input_txid,
        market_fee_satoshis: sale.market_fee,
        price_satoshis: sale.price,
        spent_outpoints: tx.inputs.iter().map(TransactionInput::outpoint).collect(),
    };
    tracing::debug!(
        txid = %pending.txid,
        size = pending.size_bytes,
        fee = pending.fee_satoshis,
        inputs = pending.num_inputs,
        outputs = pending.num_outputs,
        "transaction assembled"
    );
    Ok(pending)
}

/// Check that `script` is an (optionally inscribed) P2PKH paying `owner`.
pub(crate) fn check_owner(script: &Script, owner: &KeyManager) -> Result<(), MarketError> {
    let bare = Inscription::strip(script).map_err(MarketError::malformed)?;
    match bare.public_key_hash() {
        Ok(pkh) if pkh == owner.public_key_hash() => Ok(()),
        _ => Err(MarketError::NotListingOwner),
    }
}
