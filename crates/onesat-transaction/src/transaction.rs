//! Core transaction type.
//!
//! # Wire format
//!
//! | Field        | Size                      |
//! |--------------|---------------------------|
//! | version      | 4 bytes (LE)              |
//! | input count  | VarInt                    |
//! | inputs       | variable (per input)      |
//! | output count | VarInt                    |
//! | outputs      | variable (per output)     |
//! | lock_time    | 4 bytes (LE)              |

use onesat_primitives::hash::sha256d;
use onesat_primitives::util::{VarInt, WireReader, WireWriter};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash;
use crate::template::UnlockingScriptTemplate;
use crate::error::wire;
use crate::TransactionError;

/// Unlocking script bytes assumed for an unsigned P2PKH input:
/// push(72-byte DER signature + sighash byte) push(33-byte pubkey).
pub const P2PKH_UNLOCK_ESTIMATE: usize = 107;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a new empty transaction with version 1 and lock time 0.
    pub fn new() -> Self {
        Transaction {
            version: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse exactly one transaction; trailing bytes are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(wire("version"))?;

        let n_in = reader.read_varint().map_err(wire("input count"))?.value();
        let inputs = (0..n_in)
            .map(|_| TransactionInput::read_from(reader))
            .collect::<Result<Vec<_>, _>>()?;

        let n_out = reader.read_varint().map_err(wire("output count"))?.value();
        let outputs = (0..n_out)
            .map(|_| TransactionOutput::read_from(reader))
            .collect::<Result<Vec<_>, _>>()?;

        let lock_time = reader.read_u32_le().map_err(wire("lock time"))?;
        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize_with(|input| {
            input
                .unlocking_script
                .as_ref()
                .map(|s| s.to_bytes().to_vec())
                .unwrap_or_default()
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn serialize_with<F>(&self, unlocking: F) -> Vec<u8>
    where
        F: Fn(&TransactionInput) -> Vec<u8>,
    {
        let mut writer = WireWriter::with_capacity(256);
        writer.write_u32_le(self.version);
        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_with_script(&mut writer, &unlocking(input));
        }
        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }
        writer.write_u32_le(self.lock_time);
        writer.into_bytes()
    }

    /// Double SHA-256 of the serialized transaction, in internal byte order.
    pub fn tx_id(&self) -> [u8; 32] {
        sha256d(&self.to_bytes())
    }

    /// Display-order (byte-reversed) txid hex.
    pub fn tx_id_hex(&self) -> String {
        let mut id = self.tx_id();
        id.reverse();
        hex::encode(id)
    }

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Sum of the output values. Fails with `ValueOverflow` past `u64::MAX`.
    pub fn total_output_satoshis(&self) -> Result<u64, TransactionError> {
        self.outputs.iter().try_fold(0u64, |total, output| {
            total
                .checked_add(output.satoshis)
                .ok_or(TransactionError::ValueOverflow("outputs"))
        })
    }

    /// Sum of the spent outputs' values. Every input must carry its source
    /// output.
    pub fn total_input_satoshis(&self) -> Result<u64, TransactionError> {
        self.inputs.iter().enumerate().try_fold(0u64, |total, (i, input)| {
            let sats = input.source_satoshis().ok_or_else(|| {
                TransactionError::InvalidTransaction(format!(
                    "missing source output on input {}",
                    i
                ))
            })?;
            total
                .checked_add(sats)
                .ok_or(TransactionError::ValueOverflow("inputs"))
        })
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    /// Size once signed, counting `P2PKH_UNLOCK_ESTIMATE` bytes for every
    /// input that has no unlocking script yet.
    pub fn estimated_size(&self) -> usize {
        self.serialize_with(|input| match &input.unlocking_script {
            Some(script) => script.to_bytes().to_vec(),
            None => vec![0u8; P2PKH_UNLOCK_ESTIMATE],
        })
        .len()
    }

    /// BIP-143 preimage for `input_index` against its stored source output.
    pub fn calc_input_preimage(
        &self,
        input_index: usize,
        sighash_flag: u32,
    ) -> Result<Vec<u8>, TransactionError> {
        let source = self.source_output_of(input_index)?;
        sighash::calc_preimage(
            self,
            input_index,
            source.locking_script.to_bytes(),
            sighash_flag,
            source.satoshis,
        )
    }

    /// Signature hash for `input_index` against its stored source output.
    pub fn calc_input_signature_hash(
        &self,
        input_index: usize,
        sighash_flag: u32,
    ) -> Result<[u8; 32], TransactionError> {
        Ok(sha256d(&self.calc_input_preimage(input_index, sighash_flag)?))
    }

    /// Produce and install the unlocking script for `input_index`.
    pub fn sign_input<T>(&mut self, input_index: usize, template: &T) -> Result<(), TransactionError>
    where
        T: UnlockingScriptTemplate + ?Sized,
    {
        let script = template.sign(self, input_index)?;
        self.inputs[input_index].unlocking_script = Some(script);
        Ok(())
    }

    fn source_output_of(&self, input_index: usize) -> Result<&TransactionOutput, TransactionError> {
        let input = self.inputs.get(input_index).ok_or_else(|| {
            TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                self.inputs.len()
            ))
        })?;
        input.source_output().ok_or_else(|| {
            TransactionError::SigningError(format!(
                "missing source output on input {}",
                input_index
            ))
        })
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
