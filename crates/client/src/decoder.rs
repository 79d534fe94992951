use common::Chunk;
use protocol::{chunk::decode_chunk_column, CodecError};

/// Turns the section payload of a chunk data packet into a [`Chunk`].
pub trait ChunkDecoder {
    /// `section_mask` has one bit per section present in `data`,
    /// lowest section first.
    fn decode(&self, section_mask: i32, data: &[u8]) -> Result<Chunk, CodecError>;
}

/// Decodes the paletted section format of this protocol version.
#[derive(Copy, Clone, Debug, Default)]
pub struct PalettedChunkDecoder;

impl ChunkDecoder for PalettedChunkDecoder {
    fn decode(&self, section_mask: i32, data: &[u8]) -> Result<Chunk, CodecError> {
        decode_chunk_column(section_mask, data)
    }
}
