//! Decoding of the section payload carried by chunk data packets.
//!
//! Each section whose bit is set in the mask is encoded as:
//! * `i16` count of non-air blocks
//! * `u8` bits per block
//! * a VarInt-prefixed palette of VarInt block ids, only when
//!   the bits per block are at most [`MAX_INDIRECT_BITS`]
//! * a VarInt-prefixed array of big-endian longs holding one
//!   entry per block, in `(y * 16 + z) * 16 + x` order. Entries
//!   are packed back to back and may span two longs.

use common::{chunk::SECTIONS_PER_CHUNK, chunk::SECTION_VOLUME, BlockId, Chunk, Section};

use crate::{
    codec::{Reader, VarInt},
    error::{CodecError, Result},
};

/// Smallest bits per block sent with a palette.
pub const MIN_INDIRECT_BITS: u8 = 4;
/// Largest bits per block sent with a palette. Above this,
/// entries are global block ids.
pub const MAX_INDIRECT_BITS: u8 = 8;
/// Widest entry accepted. Direct ids use 14 bits in this
/// protocol version.
pub const MAX_BITS: u8 = 32;

/// Decodes the sections selected by `mask` from `data`.
/// Sections absent from the mask are left empty.
pub fn decode_chunk_column(mask: i32, data: &[u8]) -> Result<Chunk> {
    let mut reader = Reader::new(data);
    let mut chunk = Chunk::new();
    for index in 0..SECTIONS_PER_CHUNK {
        if mask & (1 << index) == 0 {
            continue;
        }
        chunk.set_section(index, decode_section(&mut reader)?);
    }
    log::trace!(
        "Decoded {} sections, {} trailing bytes",
        chunk.section_mask().count_ones(),
        reader.remaining()
    );
    Ok(chunk)
}

fn decode_section(reader: &mut Reader) -> Result<Section> {
    let _non_air: i16 = reader.read()?;
    let bits = reader.read_u8()?;
    if bits > MAX_BITS {
        return Err(CodecError::InvalidBitsPerBlock(bits));
    }

    let palette = if bits <= MAX_INDIRECT_BITS {
        let len = reader.read_len()?;
        let mut palette = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            palette.push(BlockId(reader.read::<VarInt>()?.0 as u32));
        }
        Some(palette)
    } else {
        None
    };
    let bits = bits.max(MIN_INDIRECT_BITS) as usize;

    let count = reader.read_len()?;
    let needed = (SECTION_VOLUME * bits + 63) / 64;
    if count < needed {
        return Err(CodecError::TruncatedPayload {
            needed: needed * 8,
            available: count * 8,
        });
    }
    let bytes = reader.read_bytes(count.saturating_mul(8))?;
    let longs: Vec<u64> = bytes
        .chunks_exact(8)
        .map(|b| u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        .collect();

    let mut section = Section::new();
    let value_mask = (1u64 << bits) - 1;
    for ordinal in 0..SECTION_VOLUME {
        let value = read_packed(&longs, ordinal * bits, bits) & value_mask;
        let block = match &palette {
            Some(palette) => {
                *palette
                    .get(value as usize)
                    .ok_or(CodecError::InvalidPaletteIndex {
                        index: value as usize,
                        len: palette.len(),
                    })?
            }
            None => BlockId(value as u32),
        };
        section.set_ordinal(ordinal, block);
    }
    Ok(section)
}

/// Reads `bits` bits starting at bit `start`, which may straddle
/// two longs.
fn read_packed(longs: &[u64], start: usize, bits: usize) -> u64 {
    let index = start / 64;
    let offset = start % 64;
    let mut value = longs[index] >> offset;
    if offset + bits > 64 {
        value |= longs[index + 1] << (64 - offset);
    }
    value
}
