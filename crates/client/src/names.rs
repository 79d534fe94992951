//! Human-readable names for registry ids.

use std::{fs, path::Path};

use ahash::AHashMap;
use anyhow::Context as _;
use common::BlockId;
use serde::Deserialize;

/// Resolves registry ids to names. Every lookup may fail;
/// the session never depends on a name being known.
pub trait NameLookup {
    fn sound(&self, _id: i32) -> Option<&str> {
        None
    }

    fn item(&self, _id: i32) -> Option<&str> {
        None
    }

    fn entity(&self, _id: i32) -> Option<&str> {
        None
    }

    fn block(&self, _block: BlockId) -> Option<&str> {
        None
    }
}

/// Knows no names.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNames;

impl NameLookup for NoNames {}

/// Name tables loaded from a YAML file of the form
///
/// ```yaml
/// sounds:
///   12: block.anvil.land
/// items:
///   1: stone
/// ```
///
/// Any table may be omitted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameTable {
    sounds: AHashMap<i32, String>,
    items: AHashMap<i32, String>,
    entities: AHashMap<i32, String>,
    blocks: AHashMap<u32, String>,
}

impl NameTable {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("failed to read name table '{}'", path.display()))?;
        Self::from_yaml(&yaml)
            .with_context(|| format!("malformed name table '{}'", path.display()))
    }
}

impl NameLookup for NameTable {
    fn sound(&self, id: i32) -> Option<&str> {
        self.sounds.get(&id).map(String::as_str)
    }

    fn item(&self, id: i32) -> Option<&str> {
        self.items.get(&id).map(String::as_str)
    }

    fn entity(&self, id: i32) -> Option<&str> {
        self.entities.get(&id).map(String::as_str)
    }

    fn block(&self, block: BlockId) -> Option<&str> {
        self.blocks.get(&block.id()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table() {
        let table = NameTable::from_yaml("sounds:\n  12: block.anvil.land\nblocks:\n  1: stone\n").unwrap();
        assert_eq!(table.sound(12), Some("block.anvil.land"));
        assert_eq!(table.sound(13), None);
        assert_eq!(table.block(BlockId(1)), Some("stone"));
        assert_eq!(table.item(1), None);
        assert_eq!(NoNames.sound(12), None);
    }
}
