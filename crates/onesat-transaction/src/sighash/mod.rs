//! Signature hash computation (BIP-143 with FORKID).
//!
//! BSV commits to the spent value and uses the BIP-143 serialization for
//! every signature carrying `SIGHASH_FORKID`. The OrdinalLock covenant
//! reconstructs this same preimage on-chain, so the byte layout here is
//! load-bearing for purchases as well as for ordinary signatures.

use onesat_primitives::hash::sha256d;
use onesat_primitives::util::WireWriter;

use crate::transaction::Transaction;
use crate::TransactionError;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Commit to all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Commit to no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Commit only to the output at the signed input's index.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Commit only to the signed input; others may be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Replay-protection flag required on all BSV signatures.
pub const SIGHASH_FORKID: u32 = 0x40;

/// The standard payment flag: ALL | FORKID.
pub const SIGHASH_ALL_FORKID: u32 = SIGHASH_ALL | SIGHASH_FORKID;

/// Mask extracting the base type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

// -----------------------------------------------------------------------
// Preimage and hash
// -----------------------------------------------------------------------

/// Double-SHA256 of the preimage for `input_index`.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_output_script: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, prev_output_script, sighash_type, satoshis)?;
    Ok(sha256d(&preimage))
}

/// The raw BIP-143 preimage:
///
/// 1. nVersion (4 bytes LE)
/// 2. hashPrevouts (32 bytes), zero under ANYONECANPAY
/// 3. hashSequence (32 bytes), zero under ANYONECANPAY, SINGLE or NONE
/// 4. outpoint (32+4 bytes)
/// 5. scriptCode (varint + script)
/// 6. value (8 bytes LE)
/// 7. nSequence (4 bytes LE)
/// 8. hashOutputs (32 bytes): all outputs, the matching output for SINGLE,
///    or zero
/// 9. nLocktime (4 bytes LE)
/// 10. sighash type (4 bytes LE)
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    prev_output_script: &[u8],
    sighash_type: u32,
    satoshis: u64,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    let anyone_can_pay = sighash_type & SIGHASH_ANYONECANPAY != 0;
    let base_type = sighash_type & SIGHASH_MASK;

    let hash_prevouts = if anyone_can_pay {
        [0u8; 32]
    } else {
        prevouts_hash(tx)
    };

    let hash_sequence =
        if anyone_can_pay || base_type == SIGHASH_SINGLE || base_type == SIGHASH_NONE {
            [0u8; 32]
        } else {
            sequence_hash(tx)
        };

    let hash_outputs = match base_type {
        SIGHASH_SINGLE if input_index < tx.outputs.len() => outputs_hash(tx, Some(input_index)),
        SIGHASH_SINGLE | SIGHASH_NONE => [0u8; 32],
        _ => outputs_hash(tx, None),
    };

    let mut writer = WireWriter::with_capacity(160 + prev_output_script.len());
    writer.write_u32_le(tx.version);
    writer.write_bytes(&hash_prevouts);
    writer.write_bytes(&hash_sequence);
    writer.write_bytes(&input.source_txid);
    writer.write_u32_le(input.source_tx_out_index);
    writer.write_var_bytes(prev_output_script);
    writer.write_u64_le(satoshis);
    writer.write_u32_le(input.sequence_number);
    writer.write_bytes(&hash_outputs);
    writer.write_u32_le(tx.lock_time);
    writer.write_u32_le(sighash_type);

    Ok(writer.into_bytes())
}

// -----------------------------------------------------------------------
// Internal helpers
// -----------------------------------------------------------------------

fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(&input.source_txid);
        writer.write_u32_le(input.source_tx_out_index);
    }
    sha256d(writer.as_bytes())
}

fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = WireWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence_number);
    }
    sha256d(writer.as_bytes())
}

/// Hash of every output, or of the single output at `only`.
fn outputs_hash(tx: &Transaction, only: Option<usize>) -> [u8; 32] {
    let mut writer = WireWriter::new();
    match only {
        Some(n) => tx.outputs[n].write_to(&mut writer),
        None => tx.outputs.iter().for_each(|o| o.write_to(&mut writer)),
    }
    sha256d(writer.as_bytes())
}
