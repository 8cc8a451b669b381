//! Script chunk parsing and push-data encoding.
//!
//! A chunk is either a bare opcode or a data push together with its bytes.
//! The engine only ever needs to walk pushes and flow-control opcodes, so
//! `OP_RETURN` is decoded like any other opcode and the pushes after it
//! stay visible (the MAP metadata trailer relies on this).

use onesat_primitives::util::WireReader;

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes) this is the length.
    pub op: u8,
    /// The pushed bytes, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Number of script bytes this chunk occupies when serialized.
    pub fn encoded_len(&self) -> usize {
        let data_len = self.data.as_ref().map_or(0, Vec::len);
        match self.op {
            OP_PUSHDATA1 => 2 + data_len,
            OP_PUSHDATA2 => 3 + data_len,
            OP_PUSHDATA4 => 5 + data_len,
            _ => 1 + data_len,
        }
    }

    /// The pushed bytes, treating `OP_0` as an empty push.
    pub fn push_bytes(&self) -> Option<&[u8]> {
        match (&self.data, self.op) {
            (Some(d), _) => Some(d.as_slice()),
            (None, OP_0) => Some(&[]),
            _ => None,
        }
    }

    /// ASM token: hex for pushes, opcode name otherwise.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) => hex::encode(data),
            None => opcode_to_string(self.op),
        }
    }
}

/// Decode raw script bytes into chunks.
///
/// Fails with `DataTooSmall` when a push runs past the end of the script.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut reader = WireReader::new(bytes);
    let mut chunks = Vec::new();

    while reader.remaining() > 0 {
        let op = reader.read_u8().map_err(|_| ScriptError::DataTooSmall)?;
        let length = match op {
            OP_DATA_1..=OP_DATA_75 => Some(op as usize),
            OP_PUSHDATA1 => Some(reader.read_u8().map_err(|_| ScriptError::DataTooSmall)? as usize),
            OP_PUSHDATA2 => Some(
                reader
                    .read_u16_le()
                    .map_err(|_| ScriptError::DataTooSmall)? as usize,
            ),
            OP_PUSHDATA4 => Some(
                reader
                    .read_u32_le()
                    .map_err(|_| ScriptError::DataTooSmall)? as usize,
            ),
            _ => None,
        };
        let data = match length {
            Some(n) => Some(
                reader
                    .read_bytes(n)
                    .map_err(|_| ScriptError::DataTooSmall)?
                    .to_vec(),
            ),
            None => None,
        };
        chunks.push(ScriptChunk { op, data });
    }

    Ok(chunks)
}

/// Minimal push prefix for a payload of `data_len` bytes.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xff {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xffff {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xffff_ffff {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_p2pkh() {
        let bytes = hex::decode("76a914e2a623699e81b291c0327f408fea765d534baa2a88ac").unwrap();
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].op, OP_DUP);
        assert_eq!(chunks[2].data.as_ref().unwrap().len(), 20);
        assert_eq!(chunks.iter().map(ScriptChunk::encoded_len).sum::<usize>(), bytes.len());
    }

    #[test]
    fn test_decode_pushdata_variants() {
        let mut bytes = vec![OP_PUSHDATA1, 80];
        bytes.extend_from_slice(&[0xaa; 80]);
        bytes.extend_from_slice(&[OP_PUSHDATA2, 0x2c, 0x01]);
        bytes.extend_from_slice(&[0xbb; 300]);
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].encoded_len(), 82);
        assert_eq!(chunks[1].data.as_ref().unwrap().len(), 300);
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(decode_script(&[0x05, 0x01]), Err(ScriptError::DataTooSmall)));
        assert!(matches!(decode_script(&[OP_PUSHDATA2, 0x01]), Err(ScriptError::DataTooSmall)));
    }

    #[test]
    fn test_op_return_keeps_following_pushes() {
        let chunks = decode_script(&[OP_RETURN, 0x01, 0xff, 0x01, 0xee]).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].op, OP_RETURN);
        assert_eq!(chunks[2].data, Some(vec![0xee]));
    }

    #[test]
    fn test_push_prefix_boundaries() {
        assert_eq!(push_data_prefix(75).unwrap(), vec![75]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(push_data_prefix(65536).unwrap(), vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_op0_is_empty_push() {
        let chunk = ScriptChunk { op: OP_0, data: None };
        assert_eq!(chunk.push_bytes(), Some(&[][..]));
        let dup = ScriptChunk { op: OP_DUP, data: None };
        assert_eq!(dup.push_bytes(), None);
    }
}
