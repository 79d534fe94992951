//! Decoding errors.

/// An error while decoding a packet or one of its fields.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("variable-length integer is longer than {max_bytes} bytes")]
    MalformedVarint { max_bytes: usize },
    #[error("payload truncated: needed {needed} bytes, but only {available} remain")]
    TruncatedPayload { needed: usize, available: usize },
    #[error("negative length prefix {0}")]
    NegativeLength(i32),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("unknown NBT tag type {0}")]
    UnknownNbtTag(u8),
    #[error("NBT nesting exceeds the maximum depth")]
    NbtTooDeep,
    #[error("packet of {len} bytes exceeds the maximum of {max}")]
    PacketTooLarge { len: usize, max: usize },
    #[error("palette index {index} out of range for palette of length {len}")]
    InvalidPaletteIndex { index: usize, len: usize },
    #[error("{0} bits per block is wider than any block id")]
    InvalidBitsPerBlock(u8),
    #[error("malformed chat component")]
    InvalidChat(#[source] serde_json::Error),
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
