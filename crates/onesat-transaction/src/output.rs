//! Transaction output: a value locked by a script.
//!
//! # Wire format
//!
//! | Field            | Size           |
//! |------------------|----------------|
//! | satoshis         | 8 bytes (LE)   |
//! | script length    | VarInt         |
//! | locking_script   | variable       |

use onesat_primitives::util::{WireReader, WireWriter};
use onesat_script::ordlock::Payout;
use onesat_script::Script;

use crate::error::wire;
use crate::TransactionError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionOutput {
    pub satoshis: u64,
    pub locking_script: Script,
}

impl TransactionOutput {
    pub fn new(satoshis: u64, locking_script: Script) -> Self {
        TransactionOutput {
            satoshis,
            locking_script,
        }
    }

    /// Deserialize an output from a `WireReader`.
    pub fn read_from(reader: &mut WireReader) -> Result<Self, TransactionError> {
        let satoshis = reader.read_u64_le().map_err(wire("satoshis"))?;
        let script = reader.read_var_bytes().map_err(wire("locking script"))?;
        Ok(TransactionOutput {
            satoshis,
            locking_script: Script::from_bytes(script),
        })
    }

    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.satoshis);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }

    /// Wire bytes, which are also the bytes committed to by sighash.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(9 + self.locking_script.len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

impl From<Payout> for TransactionOutput {
    fn from(payout: Payout) -> Self {
        TransactionOutput {
            satoshis: payout.satoshis,
            locking_script: payout.locking_script,
        }
    }
}

impl From<&Payout> for TransactionOutput {
    fn from(payout: &Payout) -> Self {
        payout.clone().into()
    }
}
