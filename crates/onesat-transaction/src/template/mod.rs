//! Unlocking script templates.
//!
//! A template knows how to turn a transaction and an input index into the
//! unlocking script for that input, and how long that script will be.

pub mod ordlock;
pub mod p2pkh;

use onesat_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

pub trait UnlockingScriptTemplate {
    /// Produce the unlocking script for `input_index`.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError>;

    /// Expected unlocking script length, for fee estimation before signing.
    fn estimate_length(&self, tx: &Transaction, input_index: usize) -> usize;
}

pub(crate) fn check_index(tx: &Transaction, input_index: usize) -> Result<(), TransactionError> {
    if input_index >= tx.inputs.len() {
        return Err(TransactionError::SigningError(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        )));
    }
    Ok(())
}

/// DER signature with the sighash byte appended.
pub(crate) fn signature_bytes(
    tx: &Transaction,
    input_index: usize,
    key: &onesat_primitives::ec::PrivateKey,
    sighash_flag: u32,
) -> Result<Vec<u8>, TransactionError> {
    let digest = tx.calc_input_signature_hash(input_index, sighash_flag)?;
    let mut sig = key.sign(&digest)?.to_der();
    sig.push(sighash_flag as u8);
    Ok(sig)
}
