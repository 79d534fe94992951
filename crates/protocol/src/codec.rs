//! Primitive field encodings shared by all packets.
//!
//! Multi-byte numbers are big-endian. Variable-length integers
//! store seven bits per byte, least significant group first,
//! with the high bit set on every byte but the last.

use common::BlockPos;
use uuid::Uuid;

use crate::error::{CodecError, Result};

/// Maximum encoded length of a [`VarInt`].
pub const VARINT_MAX_BYTES: usize = 5;
/// Maximum encoded length of a [`VarLong`].
pub const VARLONG_MAX_BYTES: usize = 10;

/// A cursor over a packet body.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Decodes a value of type `T`.
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(CodecError::TruncatedPayload {
                needed: len,
                available: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Consumes and returns all remaining bytes.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    /// Reads a VarInt length prefix.
    pub fn read_len(&mut self) -> Result<usize> {
        let VarInt(len) = self.read()?;
        if len < 0 {
            return Err(CodecError::NegativeLength(len));
        }
        Ok(len as usize)
    }

    /// Reads a VarInt-length-prefixed byte blob.
    pub fn read_byte_array(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.read_bytes(len)
    }
}

/// A value that can be read from a packet body.
pub trait Decode: Sized {
    fn decode(reader: &mut Reader) -> Result<Self>;
}

/// A value that can be appended to a packet body.
pub trait Encode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Decodes a `T` from the start of `bytes`, returning the value
/// and the number of bytes it occupied.
pub fn decode_prefix<T: Decode>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut reader = Reader::new(bytes);
    let value = reader.read()?;
    Ok((value, reader.position()))
}

/// Encodes a single value into a fresh buffer.
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode(&mut out);
    out
}

fn read_var(reader: &mut Reader, max_bytes: usize) -> Result<u64> {
    let mut value = 0u64;
    for i in 0..max_bytes {
        let byte = reader.read_u8()?;
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(CodecError::MalformedVarint { max_bytes })
}

fn write_var(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Outcome of scanning for a VarInt in a buffer that may hold
/// only part of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PartialVarInt {
    /// The value and its encoded length.
    Complete(i32, usize),
    /// More bytes are needed.
    Incomplete,
}

/// Scans a VarInt at the start of `bytes` without treating
/// a short buffer as an error.
pub fn peek_varint(bytes: &[u8]) -> Result<PartialVarInt> {
    let mut value = 0u32;
    for i in 0..VARINT_MAX_BYTES {
        let byte = match bytes.get(i) {
            Some(&byte) => byte,
            None => return Ok(PartialVarInt::Incomplete),
        };
        value |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(PartialVarInt::Complete(value as i32, i + 1));
        }
    }
    Err(CodecError::MalformedVarint {
        max_bytes: VARINT_MAX_BYTES,
    })
}

/// A 32-bit variable-length integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VarInt(pub i32);

impl VarInt {
    /// Returns the number of bytes this value occupies when encoded.
    pub fn encoded_len(self) -> usize {
        let mut value = self.0 as u32;
        let mut len = 1;
        while value >= 0x80 {
            value >>= 7;
            len += 1;
        }
        len
    }
}

impl Decode for VarInt {
    fn decode(reader: &mut Reader) -> Result<Self> {
        read_var(reader, VARINT_MAX_BYTES).map(|v| VarInt(v as u32 as i32))
    }
}

impl Encode for VarInt {
    fn encode(&self, out: &mut Vec<u8>) {
        write_var(u64::from(self.0 as u32), out);
    }
}

/// A 64-bit variable-length integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VarLong(pub i64);

impl Decode for VarLong {
    fn decode(reader: &mut Reader) -> Result<Self> {
        read_var(reader, VARLONG_MAX_BYTES).map(|v| VarLong(v as i64))
    }
}

impl Encode for VarLong {
    fn encode(&self, out: &mut Vec<u8>) {
        write_var(self.0 as u64, out);
    }
}

macro_rules! numeric {
    ($($ty:ty),*) => {
        $(
            impl Decode for $ty {
                fn decode(reader: &mut Reader) -> Result<Self> {
                    reader.read_array().map(<$ty>::from_be_bytes)
                }
            }

            impl Encode for $ty {
                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

numeric!(u8, i8, u16, i16, i32, u32, i64, u64, f32, f64);

impl Decode for bool {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(reader.read_u8()? != 0)
    }
}

impl Encode for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(*self as u8);
    }
}

impl Decode for String {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let bytes = reader.read_byte_array()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl Encode for str {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.len() as i32).encode(out);
        out.extend_from_slice(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_str().encode(out);
    }
}

/// A VarInt-length-prefixed byte blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteArray(pub Vec<u8>);

impl Decode for ByteArray {
    fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_byte_array().map(|b| ByteArray(b.to_vec()))
    }
}

impl Encode for ByteArray {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.0.len() as i32).encode(out);
        out.extend_from_slice(&self.0);
    }
}

impl Decode for Uuid {
    fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_array().map(Uuid::from_bytes)
    }
}

impl Encode for Uuid {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

/// Block positions are packed into a single 64-bit word:
/// 26 bits of x, then 26 bits of z, then 12 bits of y.
impl Decode for BlockPos {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let value = i64::decode(reader)?;
        Ok(BlockPos {
            x: (value >> 38) as i32,
            y: (value << 52 >> 52) as i32,
            z: (value << 26 >> 38) as i32,
        })
    }
}

impl Encode for BlockPos {
    fn encode(&self, out: &mut Vec<u8>) {
        let value = ((i64::from(self.x) & 0x3FF_FFFF) << 38)
            | ((i64::from(self.z) & 0x3FF_FFFF) << 12)
            | (i64::from(self.y) & 0xFFF);
        value.encode(out);
    }
}

/// A rotation in steps of 1/256 of a full turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Angle(pub u8);

impl Angle {
    pub fn degrees(self) -> f32 {
        f32::from(self.0) * 360.0 / 256.0
    }
}

impl Decode for Angle {
    fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_u8().map(Angle)
    }
}

impl Encode for Angle {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.0);
    }
}
