/// Error types for script construction and decoding.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Base64 decoding error (inscription payloads).
    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Token inscription JSON could not be encoded or decoded.
    #[error("token json: {0}")]
    Json(#[from] serde_json::Error),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// Attempted to append a push opcode without its data.
    #[error("use append_push_data for push opcodes: 0x{0:02x}")]
    InvalidOpcodeType(u8),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Address version byte is not P2PKH mainnet/testnet.
    #[error("address not supported: {0}")]
    UnsupportedAddress(String),

    /// Script is not a P2PKH script.
    #[error("not a P2PKH")]
    NotP2PKH,

    /// The inscription envelope is present but malformed.
    #[error("malformed inscription envelope: {0}")]
    MalformedEnvelope(String),

    /// The script does not carry a well-formed OrdinalLock covenant.
    #[error("malformed ordinal lock: {0}")]
    MalformedOrdLock(String),

    /// The token inscription is missing a field or carries a bad number.
    #[error("invalid token inscription: {0}")]
    InvalidToken(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] onesat_primitives::PrimitivesError),
}
