//! Transaction input referencing a previous output.
//!
//! # Wire format
//!
//! | Field              | Size             |
//! |--------------------|------------------|
//! | source_txid        | 32 bytes (LE)    |
//! | source_tx_out_index| 4 bytes (LE)     |
//! | script length      | VarInt           |
//! | unlocking_script   | variable         |
//! | sequence_number    | 4 bytes (LE)     |

use onesat_primitives::util::{WireReader, WireWriter};
use onesat_script::Script;

use crate::outpoint::Outpoint;
use crate::output::TransactionOutput;
use crate::error::wire;
use crate::TransactionError;

/// Default sequence number indicating a finalized input.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a transaction.
///
/// The spent output (`source_output`) is local-only data needed for the
/// sighash preimage and fee accounting; it is never serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    pub source_txid: [u8; 32],
    pub source_tx_out_index: u32,
    pub sequence_number: u32,
    /// `None` until the input is signed.
    pub unlocking_script: Option<Script>,
    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    /// An unsigned input spending `outpoint`, which holds `source_output`.
    pub fn spending(outpoint: &Outpoint, source_output: TransactionOutput) -> Self {
        TransactionInput {
            source_txid: outpoint.txid,
            source_tx_out_index: outpoint.vout,
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            unlocking_script: None,
            source_output: Some(source_output),
        }
    }

    pub fn outpoint(&self) -> Outpoint {
        Outpoint::new(self.source_txid, self.source_tx_out_index)
    }

    pub fn source_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }

    pub fn source_satoshis(&self) -> Option<u64> {
        self.source_output.as_ref().map(|o| o.satoshis)
    }

    /// Deserialize an input from a `WireReader`. The source output is unknown.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let source_txid = reader.read_array::<32>().map_err(wire("source txid"))?;
        let source_tx_out_index = reader.read_u32_le().map_err(wire("output index"))?;
        let script = reader.read_var_bytes().map_err(wire("unlocking script"))?;
        let sequence_number = reader.read_u32_le().map_err(wire("sequence number"))?;

        Ok(TransactionInput {
            source_txid,
            source_tx_out_index,
            sequence_number,
            unlocking_script: (!script.is_empty()).then(|| Script::from_bytes(script)),
            source_output: None,
        })
    }

    /// Serialize with the given unlocking script bytes in place of our own.
    pub(crate) fn write_with_script(&self, writer: &mut WireWriter, script: &[u8]) {
        writer.write_bytes(&self.source_txid);
        writer.write_u32_le(self.source_tx_out_index);
        writer.write_var_bytes(script);
        writer.write_u32_le(self.sequence_number);
    }

    pub fn write_to(&self, writer: &mut WireWriter) {
        let script = self
            .unlocking_script
            .as_ref()
            .map(Script::to_bytes)
            .unwrap_or_default();
        self.write_with_script(writer, script);
    }
}
