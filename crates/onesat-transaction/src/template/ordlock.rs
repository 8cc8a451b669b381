//! Unlocking templates for OrdinalLock listings.
//!
//! Cancel: `<sig> <pubkey> OP_1`, signed SINGLE|ANYONECANPAY|FORKID by the
//! listing owner, committing to the artifact's return output at the same
//! index.
//!
//! Purchase: `<output #0> <outputs #2..> <preimage> OP_0`. No key is
//! involved; the covenant rebuilds hashOutputs from the pushed outputs and
//! its own embedded payout, and checks the result against the preimage.

use onesat_primitives::ec::PrivateKey;
use onesat_script::opcodes::{OP_0, OP_1};
use onesat_script::Script;

use crate::role::InputRole;
use crate::template::{check_index, signature_bytes, UnlockingScriptTemplate};
use crate::transaction::Transaction;
use crate::TransactionError;

/// Cancel unlock: 73-byte signature push, 34-byte pubkey push, `OP_1`.
const CANCEL_UNLOCK_ESTIMATE: usize = 108;

pub fn cancel(private_key: PrivateKey) -> OrdLockCancel {
    OrdLockCancel { private_key }
}

pub fn purchase() -> OrdLockPurchase {
    OrdLockPurchase
}

pub struct OrdLockCancel {
    private_key: PrivateKey,
}

impl UnlockingScriptTemplate for OrdLockCancel {
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        check_index(tx, input_index)?;
        let flag = InputRole::ListingCancel.sighash_flag();
        let sig = signature_bytes(tx, input_index, &self.private_key, flag)?;

        let mut script = Script::new();
        script.append_push_data(&sig)?;
        script.append_push_data(&self.private_key.pub_key().to_compressed())?;
        script.append_opcodes(&[OP_1])?;
        Ok(script)
    }

    fn estimate_length(&self, _tx: &Transaction, _input_index: usize) -> usize {
        CANCEL_UNLOCK_ESTIMATE
    }
}

pub struct OrdLockPurchase;

impl OrdLockPurchase {
    /// The three data pushes of the purchase unlock, in order.
    pub fn parts(tx: &Transaction, input_index: usize) -> Result<[Vec<u8>; 3], TransactionError> {
        check_index(tx, input_index)?;
        let first = tx.outputs.first().ok_or_else(|| {
            TransactionError::SigningError("purchase has no buyer output".to_string())
        })?;
        if tx.outputs.len() < 2 {
            return Err(TransactionError::SigningError(
                "purchase has no payout output".to_string(),
            ));
        }
        let rest: Vec<u8> = tx.outputs[2..].iter().flat_map(|o| o.to_bytes()).collect();
        let preimage =
            tx.calc_input_preimage(input_index, InputRole::ListingPurchase.sighash_flag())?;
        Ok([first.to_bytes(), rest, preimage])
    }
}

impl UnlockingScriptTemplate for OrdLockPurchase {
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        let [first, rest, preimage] = Self::parts(tx, input_index)?;
        let mut script = Script::new();
        script.append_push_data(&first)?;
        script.append_push_data(&rest)?;
        script.append_push_data(&preimage)?;
        script.append_opcodes(&[OP_0])?;
        Ok(script)
    }

    fn estimate_length(&self, tx: &Transaction, input_index: usize) -> usize {
        self.sign(tx, input_index).map(|s| s.len()).unwrap_or(0)
    }
}
