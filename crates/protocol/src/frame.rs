//! Packet framing.
//!
//! Every packet is prefixed by its total length as a VarInt,
//! followed by the VarInt packet id and the packet fields.
//! Compression is not supported.

use std::io::{self, Read};

use derivative::Derivative;

use crate::{
    codec::{decode_prefix, peek_varint, Encode, PartialVarInt, VarInt},
    error::{CodecError, Result},
};

/// Largest frame accepted, matching the largest length
/// representable in a three-byte VarInt.
pub const MAX_PACKET_LEN: usize = 2_097_151;

/// A framed packet whose fields have not been decoded yet.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct RawPacket {
    pub id: i32,
    #[derivative(Debug = "ignore")]
    pub body: Vec<u8>,
}

impl RawPacket {
    pub fn new(id: i32, body: Vec<u8>) -> Self {
        Self { id, body }
    }
}

/// Appends a complete frame holding `id` and `body` to `out`.
pub fn write_frame(id: i32, body: &[u8], out: &mut Vec<u8>) {
    let id = VarInt(id);
    let len = id.encoded_len() + body.len();
    VarInt(len as i32).encode(out);
    id.encode(out);
    out.extend_from_slice(body);
}

/// Reassembles frames from a byte stream that may deliver
/// them in arbitrary pieces.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of buffered bytes not yet consumed by a frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Appends bytes received from the transport.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Reads once from `src` into the buffer. Returns the number of
    /// bytes read; zero means end of stream.
    pub fn fill(&mut self, src: &mut impl Read) -> io::Result<usize> {
        let mut chunk = [0; 4096];
        let n = src.read(&mut chunk)?;
        self.extend(&chunk[..n]);
        Ok(n)
    }

    /// Takes the next complete frame out of the buffer, or returns
    /// `None` if the buffer holds only part of one (including part
    /// of its length prefix).
    pub fn next_frame(&mut self) -> Result<Option<RawPacket>> {
        let (len, prefix) = match peek_varint(&self.buf)? {
            PartialVarInt::Complete(len, prefix) => (len, prefix),
            PartialVarInt::Incomplete => return Ok(None),
        };
        if len < 0 {
            return Err(CodecError::NegativeLength(len));
        }
        let len = len as usize;
        if len > MAX_PACKET_LEN {
            return Err(CodecError::PacketTooLarge {
                len,
                max: MAX_PACKET_LEN,
            });
        }
        if self.buf.len() < prefix + len {
            return Ok(None);
        }

        let frame: Vec<u8> = self.buf.drain(..prefix + len).skip(prefix).collect();
        let (VarInt(id), id_len) = decode_prefix(&frame)?;
        Ok(Some(RawPacket::new(id, frame[id_len..].to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_roundtrip_in_pieces() {
        let mut stream = Vec::new();
        write_frame(0x21, &[1, 2, 3, 4, 5, 6, 7, 8], &mut stream);
        write_frame(0x1b, &[], &mut stream);

        let mut reader = FrameReader::new();
        let mut frames = Vec::new();
        for byte in stream {
            reader.extend(&[byte]);
            while let Some(frame) = reader.next_frame().unwrap() {
                frames.push(frame);
            }
        }
        assert_eq!(
            frames,
            vec![
                RawPacket::new(0x21, vec![1, 2, 3, 4, 5, 6, 7, 8]),
                RawPacket::new(0x1b, vec![]),
            ]
        );
        assert_eq!(reader.buffered(), 0);
    }

    #[test]
    fn oversized_frame() {
        let mut reader = FrameReader::new();
        reader.extend(&[0x80, 0x80, 0x80, 0x01]);
        assert!(matches!(
            reader.next_frame(),
            Err(CodecError::PacketTooLarge { .. })
        ));
    }

    #[test]
    fn fill_reads_from_source() {
        let mut stream = Vec::new();
        write_frame(0x00, b"hi", &mut stream);
        let mut src = &stream[..];

        let mut reader = FrameReader::new();
        assert_eq!(reader.fill(&mut src).unwrap(), 4);
        assert_eq!(reader.fill(&mut src).unwrap(), 0);
        assert_eq!(
            reader.next_frame().unwrap(),
            Some(RawPacket::new(0, b"hi".to_vec()))
        );
    }
}
