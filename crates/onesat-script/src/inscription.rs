//! The 1Sat inscription envelope.
//!
//! An inscribed output carries
//!
//! ```text
//! OP_0 OP_IF "ord" OP_1 <content-type> OP_0 <payload> OP_ENDIF <destination lock>
//! [OP_RETURN <MAP prefix> "SET" <key> <value> ...]
//! ```
//!
//! The envelope is a dead branch at execution time, so the output stays
//! spendable exactly like its destination lock.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::chunk::{decode_script, ScriptChunk};
use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Protocol marker pushed first inside the envelope.
pub const ORD_MARKER: &[u8] = b"ord";

/// Bitcom address of the MAP metadata protocol.
pub const MAP_PREFIX: &str = "1PuQa7K62MiKCtssSLKy1kh56WWU7MtUR5";

const MAP_SET: &str = "SET";

/// An artifact to be inscribed, or one decoded from a script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inscription {
    pub content_type: String,
    pub payload: Vec<u8>,
    /// Ordered MAP key/value pairs.
    pub metadata: Vec<(String, String)>,
}

impl Inscription {
    pub fn new(content_type: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Inscription {
            content_type: content_type.into(),
            payload: payload.into(),
            metadata: Vec::new(),
        }
    }

    /// Build from a base64 payload as supplied by a UI or file reader.
    pub fn from_base64(content_type: &str, payload_base64: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(content_type, BASE64.decode(payload_base64)?))
    }

    /// Append a MAP metadata pair; order is preserved.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    pub fn payload_base64(&self) -> String {
        BASE64.encode(&self.payload)
    }

    /// The bare `OP_0 OP_IF ... OP_ENDIF` envelope.
    pub fn envelope(&self) -> Result<Script, ScriptError> {
        let mut script = Script::new();
        script.append_opcodes(&[OP_FALSE, OP_IF])?;
        script.append_push_data(ORD_MARKER)?;
        script.append_opcodes(&[OP_1])?;
        script.append_push_data(self.content_type.as_bytes())?;
        script.append_opcodes(&[OP_0])?;
        script.append_push_data(&self.payload)?;
        script.append_opcodes(&[OP_ENDIF])?;
        Ok(script)
    }

    /// Envelope, then `destination`, then the MAP trailer when metadata is set.
    pub fn lock(&self, destination: &Script) -> Result<Script, ScriptError> {
        let mut script = self.envelope()?;
        script.append_script(destination);
        if !self.metadata.is_empty() {
            script.append_opcodes(&[OP_RETURN])?;
            script.append_push_data(MAP_PREFIX.as_bytes())?;
            script.append_push_data(MAP_SET.as_bytes())?;
            for (key, value) in &self.metadata {
                script.append_push_data(key.as_bytes())?;
                script.append_push_data(value.as_bytes())?;
            }
        }
        Ok(script)
    }

    /// Decode the first inscription envelope found in `script`.
    ///
    /// Returns `Ok(None)` when the script carries no envelope, and an error
    /// when an envelope starts but is not well formed.
    pub fn parse(script: &Script) -> Result<Option<Inscription>, ScriptError> {
        Ok(locate(script)?.map(|found| found.inscription))
    }

    /// The script with any leading envelope and trailing MAP data removed.
    ///
    /// For an inscribed P2PKH output this is the plain P2PKH lock of the
    /// artifact's owner.
    pub fn strip(script: &Script) -> Result<Script, ScriptError> {
        let found = match locate(script)? {
            Some(found) => found,
            None => return Ok(script.clone()),
        };
        let bytes = script.to_bytes();
        let mut out = Script::from_bytes(&bytes[..found.start]);
        out.append_raw(&bytes[found.end..found.trailer_start]);
        Ok(out)
    }
}

/// Shorthand for `inscription.lock(destination)`.
pub fn inscription_envelope(
    inscription: &Inscription,
    destination: &Script,
) -> Result<Script, ScriptError> {
    inscription.lock(destination)
}

struct Located {
    inscription: Inscription,
    /// Byte offset of `OP_0 OP_IF`.
    start: usize,
    /// Byte offset just past `OP_ENDIF`.
    end: usize,
    /// Byte offset of the MAP trailer's `OP_RETURN`, or the script length.
    trailer_start: usize,
}

fn locate(script: &Script) -> Result<Option<Located>, ScriptError> {
    let chunks = match decode_script(script.to_bytes()) {
        Ok(chunks) => chunks,
        // Unparseable scripts cannot carry an envelope we recognise.
        Err(_) => return Ok(None),
    };

    let mut offsets = Vec::with_capacity(chunks.len() + 1);
    let mut pos = 0;
    for chunk in &chunks {
        offsets.push(pos);
        pos += chunk.encoded_len();
    }
    offsets.push(pos);

    let start_idx = chunks.windows(3).position(|w| {
        w[0].op == OP_FALSE && w[1].op == OP_IF && w[2].data.as_deref() == Some(ORD_MARKER)
    });
    let start_idx = match start_idx {
        Some(i) => i,
        None => return Ok(None),
    };

    let mut inscription = Inscription::default();
    let mut i = start_idx + 3;
    let end_idx = loop {
        let tag = chunks
            .get(i)
            .ok_or_else(|| ScriptError::MalformedEnvelope("missing OP_ENDIF".to_string()))?;
        if tag.op == OP_ENDIF {
            break i;
        }
        let value = chunks
            .get(i + 1)
            .and_then(ScriptChunk::push_bytes)
            .ok_or_else(|| ScriptError::MalformedEnvelope("field without value".to_string()))?;
        match tag.op {
            OP_0 => inscription.payload = value.to_vec(),
            OP_1 => {
                inscription.content_type = String::from_utf8(value.to_vec()).map_err(|_| {
                    ScriptError::MalformedEnvelope("content type is not utf-8".to_string())
                })?;
            }
            // Unknown fields are skipped.
            _ => {}
        }
        i += 2;
    };

    let mut trailer_start = script.len();
    if let Some(ret_idx) = chunks[end_idx + 1..]
        .iter()
        .position(|c| c.op == OP_RETURN)
        .map(|p| p + end_idx + 1)
    {
        let rest = &chunks[ret_idx + 1..];
        let is_map = rest.first().and_then(|c| c.data.as_deref()) == Some(MAP_PREFIX.as_bytes());
        if is_map {
            trailer_start = offsets[ret_idx];
            inscription.metadata = parse_map_pairs(&rest[1..]);
        }
    }

    Ok(Some(Located {
        inscription,
        start: offsets[start_idx],
        end: offsets[end_idx + 1],
        trailer_start,
    }))
}

fn parse_map_pairs(chunks: &[ScriptChunk]) -> Vec<(String, String)> {
    let mut iter = chunks.iter().filter_map(|c| c.push_bytes());
    if iter.next() != Some(MAP_SET.as_bytes()) {
        return Vec::new();
    }
    let mut pairs = Vec::new();
    while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
        pairs.push((
            String::from_utf8_lossy(k).into_owned(),
            String::from_utf8_lossy(v).into_owned(),
        ));
    }
    pairs
}
