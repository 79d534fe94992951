//! Named Binary Tag: the recursive self-describing value format
//! used for item metadata and block entities.
//!
//! On the network a value is written as one tag-type byte, a name,
//! then the payload. A lone `End` tag in place of a value means
//! "no value".

use std::collections::BTreeMap;

use crate::{
    codec::{Decode, Encode, Reader},
    error::{CodecError, Result},
};

/// Maximum nesting of lists and compounds.
pub const MAX_DEPTH: usize = 512;

/// Tag type bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl Tag {
    pub fn from_byte(byte: u8) -> Result<Self> {
        Ok(match byte {
            0 => Tag::End,
            1 => Tag::Byte,
            2 => Tag::Short,
            3 => Tag::Int,
            4 => Tag::Long,
            5 => Tag::Float,
            6 => Tag::Double,
            7 => Tag::ByteArray,
            8 => Tag::String,
            9 => Tag::List,
            10 => Tag::Compound,
            11 => Tag::IntArray,
            12 => Tag::LongArray,
            x => return Err(CodecError::UnknownNbtTag(x)),
        })
    }
}

/// A compound: named fields of any type.
pub type Compound = BTreeMap<String, Nbt>;

/// A tagged value.
#[derive(Clone, Debug, PartialEq)]
pub enum Nbt {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// A homogeneous list. The element tag is kept so that
    /// empty lists round-trip.
    List(Tag, Vec<Nbt>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Nbt {
    pub fn tag(&self) -> Tag {
        match self {
            Nbt::Byte(_) => Tag::Byte,
            Nbt::Short(_) => Tag::Short,
            Nbt::Int(_) => Tag::Int,
            Nbt::Long(_) => Tag::Long,
            Nbt::Float(_) => Tag::Float,
            Nbt::Double(_) => Tag::Double,
            Nbt::ByteArray(_) => Tag::ByteArray,
            Nbt::String(_) => Tag::String,
            Nbt::List(..) => Tag::List,
            Nbt::Compound(_) => Tag::Compound,
            Nbt::IntArray(_) => Tag::IntArray,
            Nbt::LongArray(_) => Tag::LongArray,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Nbt::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up a field if this is a compound.
    pub fn get(&self, name: &str) -> Option<&Nbt> {
        self.as_compound()?.get(name)
    }

    fn decode_payload(reader: &mut Reader, tag: Tag, depth: usize) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(CodecError::NbtTooDeep);
        }
        Ok(match tag {
            // End only terminates compounds; as a payload it is
            // only legal as the element type of an empty list.
            Tag::End => return Err(CodecError::UnknownNbtTag(0)),
            Tag::Byte => Nbt::Byte(reader.read()?),
            Tag::Short => Nbt::Short(reader.read()?),
            Tag::Int => Nbt::Int(reader.read()?),
            Tag::Long => Nbt::Long(reader.read()?),
            Tag::Float => Nbt::Float(reader.read()?),
            Tag::Double => Nbt::Double(reader.read()?),
            Tag::ByteArray => {
                let len = read_array_len(reader, 1)?;
                Nbt::ByteArray(reader.read_bytes(len)?.iter().map(|&b| b as i8).collect())
            }
            Tag::String => Nbt::String(read_string(reader)?),
            Tag::List => {
                let element = Tag::from_byte(reader.read_u8()?)?;
                let len = read_array_len(reader, 0)?;
                if element == Tag::End && len > 0 {
                    return Err(CodecError::UnknownNbtTag(0));
                }
                let mut values = Vec::with_capacity(len.min(reader.remaining()));
                for _ in 0..len {
                    values.push(Self::decode_payload(reader, element, depth + 1)?);
                }
                Nbt::List(element, values)
            }
            Tag::Compound => {
                let mut compound = Compound::new();
                loop {
                    let tag = Tag::from_byte(reader.read_u8()?)?;
                    if tag == Tag::End {
                        break;
                    }
                    let name = read_string(reader)?;
                    let value = Self::decode_payload(reader, tag, depth + 1)?;
                    compound.insert(name, value);
                }
                Nbt::Compound(compound)
            }
            Tag::IntArray => {
                let len = read_array_len(reader, 4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read()?);
                }
                Nbt::IntArray(values)
            }
            Tag::LongArray => {
                let len = read_array_len(reader, 8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read()?);
                }
                Nbt::LongArray(values)
            }
        })
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        match self {
            Nbt::Byte(v) => v.encode(out),
            Nbt::Short(v) => v.encode(out),
            Nbt::Int(v) => v.encode(out),
            Nbt::Long(v) => v.encode(out),
            Nbt::Float(v) => v.encode(out),
            Nbt::Double(v) => v.encode(out),
            Nbt::ByteArray(values) => {
                (values.len() as i32).encode(out);
                out.extend(values.iter().map(|&b| b as u8));
            }
            Nbt::String(s) => write_string(s, out),
            Nbt::List(element, values) => {
                out.push(*element as u8);
                (values.len() as i32).encode(out);
                for value in values {
                    value.encode_payload(out);
                }
            }
            Nbt::Compound(compound) => {
                for (name, value) in compound {
                    out.push(value.tag() as u8);
                    write_string(name, out);
                    value.encode_payload(out);
                }
                out.push(Tag::End as u8);
            }
            Nbt::IntArray(values) => {
                (values.len() as i32).encode(out);
                values.iter().for_each(|v| v.encode(out));
            }
            Nbt::LongArray(values) => {
                (values.len() as i32).encode(out);
                values.iter().for_each(|v| v.encode(out));
            }
        }
    }
}

/// A top-level value together with its name (usually empty).
#[derive(Clone, Debug, PartialEq)]
pub struct NamedNbt {
    pub name: String,
    pub value: Nbt,
}

/// Decodes an optional root value. A leading `End` tag
/// decodes to `None`.
impl Decode for Option<NamedNbt> {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let tag = Tag::from_byte(reader.read_u8()?)?;
        if tag == Tag::End {
            return Ok(None);
        }
        let name = read_string(reader)?;
        let value = Nbt::decode_payload(reader, tag, 0)?;
        Ok(Some(NamedNbt { name, value }))
    }
}

impl Encode for Option<NamedNbt> {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Some(named) => named.encode(out),
            None => out.push(Tag::End as u8),
        }
    }
}

impl Encode for NamedNbt {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.value.tag() as u8);
        write_string(&self.name, out);
        self.value.encode_payload(out);
    }
}

fn read_array_len(reader: &mut Reader, element_size: usize) -> Result<usize> {
    let len = i32::decode(reader)?;
    if len < 0 {
        return Err(CodecError::NegativeLength(len));
    }
    let len = len as usize;
    // Reject before allocating.
    if element_size > 0 && len.saturating_mul(element_size) > reader.remaining() {
        return Err(CodecError::TruncatedPayload {
            needed: len.saturating_mul(element_size),
            available: reader.remaining(),
        });
    }
    Ok(len)
}

fn read_string(reader: &mut Reader) -> Result<String> {
    let len = u16::decode(reader)? as usize;
    let bytes = reader.read_bytes(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    (s.len() as u16).encode(out);
    out.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use crate::codec::{decode_prefix, encode_to_vec};

    use super::*;

    fn sample() -> NamedNbt {
        let mut display = Compound::new();
        display.insert("Name".to_owned(), Nbt::String("{\"text\":\"Pick\"}".to_owned()));

        let mut root = Compound::new();
        root.insert("Damage".to_owned(), Nbt::Int(12));
        root.insert("display".to_owned(), Nbt::Compound(display));
        root.insert(
            "Enchantments".to_owned(),
            Nbt::List(
                Tag::Compound,
                vec![Nbt::Compound(
                    [("lvl".to_owned(), Nbt::Short(3))].into_iter().collect(),
                )],
            ),
        );
        root.insert("Empty".to_owned(), Nbt::List(Tag::End, vec![]));
        root.insert("Longs".to_owned(), Nbt::LongArray(vec![-1, 2]));
        NamedNbt {
            name: String::new(),
            value: Nbt::Compound(root),
        }
    }

    #[test]
    fn end_tag_is_no_value() {
        let (value, len) = decode_prefix::<Option<NamedNbt>>(&[0]).unwrap();
        assert_eq!(value, None);
        assert_eq!(len, 1);
    }

    #[test]
    fn compound_roundtrip() {
        let nbt = Some(sample());
        let bytes = encode_to_vec(&nbt);
        let (decoded, len) = decode_prefix::<Option<NamedNbt>>(&bytes).unwrap();
        assert_eq!(len, bytes.len());
        assert_eq!(decoded, nbt);
        let decoded = decoded.unwrap();
        assert_eq!(decoded.value.get("Damage"), Some(&Nbt::Int(12)));
    }

    #[test]
    fn hand_written_compound() {
        // TAG_Compound "" { TAG_Byte "a" = 5 }
        let bytes = [10, 0, 0, 1, 0, 1, b'a', 5, 0];
        let (decoded, _) = decode_prefix::<Option<NamedNbt>>(&bytes).unwrap();
        assert_eq!(decoded.unwrap().value.get("a"), Some(&Nbt::Byte(5)));
    }

    #[test]
    fn invalid_utf8_name() {
        // TAG_Compound "" { TAG_Byte "\xff" = 5 }
        let bytes = [10, 0, 0, 1, 0, 1, 0xff, 5, 0];
        assert!(matches!(
            decode_prefix::<Option<NamedNbt>>(&bytes),
            Err(CodecError::InvalidUtf8)
        ));
    }

    #[test]
    fn unknown_tag() {
        let bytes = [10, 0, 0, 13, 0, 1, b'a', 0];
        assert!(matches!(
            decode_prefix::<Option<NamedNbt>>(&bytes),
            Err(CodecError::UnknownNbtTag(13))
        ));
    }

    #[test]
    fn depth_limit() {
        // A root list nested deeper than allowed.
        let mut bytes = vec![9, 0, 0];
        for _ in 0..MAX_DEPTH + 1 {
            bytes.extend_from_slice(&[9, 0, 0, 0, 1]);
        }
        bytes.extend_from_slice(&[0, 0, 0, 0, 0]);
        assert!(matches!(
            decode_prefix::<Option<NamedNbt>>(&bytes),
            Err(CodecError::NbtTooDeep)
        ));
    }

    #[test]
    fn truncated_array_rejected_before_allocation() {
        // TAG_IntArray "" claiming i32::MAX elements
        let bytes = [11, 0, 0, 0x7f, 0xff, 0xff, 0xff];
        assert!(matches!(
            decode_prefix::<Option<NamedNbt>>(&bytes),
            Err(CodecError::TruncatedPayload { .. })
        ));
    }
}
