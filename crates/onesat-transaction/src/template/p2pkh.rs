//! P2PKH unlocking: `<DER signature + sighash byte> <compressed pubkey>`.

use onesat_primitives::ec::PrivateKey;
use onesat_script::Script;

use crate::role::InputRole;
use crate::template::{check_index, signature_bytes, UnlockingScriptTemplate};
use crate::transaction::{Transaction, P2PKH_UNLOCK_ESTIMATE};
use crate::TransactionError;

/// Create a P2PKH unlocker signing with `role`'s sighash flag.
///
/// Only `Payment` and `AssetRelease` apply to plain P2PKH inputs; signing
/// with another role fails.
pub fn unlock(private_key: PrivateKey, role: InputRole) -> P2PKH {
    P2PKH { private_key, role }
}

pub struct P2PKH {
    private_key: PrivateKey,
    role: InputRole,
}

impl UnlockingScriptTemplate for P2PKH {
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        check_index(tx, input_index)?;
        if !matches!(self.role, InputRole::Payment | InputRole::AssetRelease) {
            return Err(TransactionError::SigningError(format!(
                "{:?} is not a P2PKH signing role",
                self.role
            )));
        }

        let sig = signature_bytes(tx, input_index, &self.private_key, self.role.sighash_flag())?;
        let mut script = Script::new();
        script.append_push_data(&sig)?;
        script.append_push_data(&self.private_key.pub_key().to_compressed())?;
        Ok(script)
    }

    fn estimate_length(&self, _tx: &Transaction, _input_index: usize) -> usize {
        P2PKH_UNLOCK_ESTIMATE
    }
}
