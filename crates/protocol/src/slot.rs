//! Item stacks.

use crate::{
    codec::{Decode, Encode, Reader, VarInt},
    error::Result,
    nbt::NamedNbt,
};

/// A non-empty stack of items.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemStack {
    /// Item id in the server's item registry.
    pub item: i32,
    pub count: i8,
    /// Item metadata (enchantments, damage, display name, ...).
    pub nbt: Option<NamedNbt>,
}

/// An inventory slot, which is either empty or holds a stack.
///
/// Slots are values: an update replaces the whole slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slot(pub Option<ItemStack>);

impl Slot {
    pub fn empty() -> Self {
        Slot(None)
    }

    pub fn new(item: i32, count: i8) -> Self {
        Slot(Some(ItemStack {
            item,
            count,
            nbt: None,
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn stack(&self) -> Option<&ItemStack> {
        self.0.as_ref()
    }
}

impl Decode for Slot {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let present: bool = reader.read()?;
        if !present {
            return Ok(Slot(None));
        }
        let VarInt(item) = reader.read()?;
        let count = reader.read()?;
        // A bare End tag here is the normal "no metadata" marker.
        let nbt = reader.read()?;
        Ok(Slot(Some(ItemStack { item, count, nbt })))
    }
}

impl Encode for Slot {
    fn encode(&self, out: &mut Vec<u8>) {
        match &self.0 {
            None => false.encode(out),
            Some(stack) => {
                true.encode(out);
                VarInt(stack.item).encode(out);
                stack.count.encode(out);
                stack.nbt.encode(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codec::{decode_prefix, encode_to_vec},
        error::CodecError,
        nbt::Nbt,
    };

    use super::*;

    #[test]
    fn empty_slot_is_one_byte() {
        assert_eq!(encode_to_vec(&Slot::empty()), [0]);
        assert_eq!(decode_prefix::<Slot>(&[0, 0xaa]).unwrap(), (Slot::empty(), 1));
    }

    #[test]
    fn stack_without_metadata() {
        // present, item 1, count 64, End
        let (slot, len) = decode_prefix::<Slot>(&[1, 1, 64, 0]).unwrap();
        assert_eq!(len, 4);
        assert_eq!(slot, Slot::new(1, 64));
    }

    #[test]
    fn stack_with_metadata() {
        let slot = Slot(Some(ItemStack {
            item: 600,
            count: 1,
            nbt: Some(NamedNbt {
                name: String::new(),
                value: Nbt::Compound([("Damage".to_owned(), Nbt::Int(3))].into_iter().collect()),
            }),
        }));
        let bytes = encode_to_vec(&slot);
        assert_eq!(decode_prefix::<Slot>(&bytes).unwrap(), (slot, bytes.len()));
    }

    #[test]
    fn truncated_stack() {
        assert!(matches!(
            decode_prefix::<Slot>(&[1, 1]),
            Err(CodecError::TruncatedPayload { .. })
        ));
    }
}
