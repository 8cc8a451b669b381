use onesat_script::Address;
use onesat_transaction::{InputRole, TransactionOutput};

use super::{check_owner, pending, Draft, Funding, Sale, TransactionAssembler};
use crate::keys::KeyManager;
use crate::types::{PendingTransaction, Utxo};
use crate::MarketError;

/// How much a plain transfer sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendAmount {
    Satoshis(u64),
    /// Every funding UTXO, less the miner fee.
    Max,
}

impl TransactionAssembler {
    /// Pay `recipient` from the payment address.
    pub fn send_satoshis(
        &self,
        payment: &KeyManager,
        recipient: &Address,
        amount: SendAmount,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        tracing::debug!(recipient = %recipient, ?amount, "send");
        let mut draft = Draft::new();
        match amount {
            SendAmount::Satoshis(sats) => {
                draft.add_output(TransactionOutput::new(sats, recipient.locking_script()));
                self.fund(&mut draft, funding, Funding::Select, payment, false)?;
            }
            SendAmount::Max => {
                if funding.is_empty() {
                    return Err(MarketError::NoFundingUtxo);
                }
                for utxo in funding {
                    draft.add_utxo(utxo, InputRole::Payment, payment)?;
                }
                draft.add_output(TransactionOutput::new(0, recipient.locking_script()));
                let fee = self
                    .config
                    .fee_rate()
                    .fee_for(draft.tx.estimated_size() as u64);
                let available = draft.tx.total_input_satoshis()?;
                if available <= fee {
                    return Err(MarketError::InsufficientFunds {
                        needed: fee + 1,
                        available,
                    });
                }
                draft.tx.outputs[0].satoshis = available - fee;
            }
        }
        let tx = draft.sign()?;
        pending(&tx, 0, Sale::default())
    }

    /// Move an artifact to `recipient`.
    ///
    /// The artifact is input #0, signed `Payment` by the ordinal key, and
    /// lands on output #0 as a plain P2PKH to `recipient`; funding pays
    /// the fee.
    pub fn transfer_ordinal(
        &self,
        ordinal: &KeyManager,
        payment: &KeyManager,
        artifact: &Utxo,
        recipient: &Address,
        funding: &[Utxo],
    ) -> Result<PendingTransaction, MarketError> {
        check_owner(&artifact.script, ordinal)?;
        tracing::debug!(artifact = %artifact.outpoint()?, recipient = %recipient, "transfer ordinal");

        let mut draft = Draft::new();
        draft.add_utxo(artifact, InputRole::Payment, ordinal)?;
        draft.add_output(TransactionOutput::new(artifact.satoshis, recipient.locking_script()));
        self.fund(&mut draft, funding, Funding::Select, payment, false)?;
        let tx = draft.sign()?;
        pending(&tx, 1, Sale::default())
    }
}
