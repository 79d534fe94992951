//! Block identifiers.

use std::fmt;

/// A block state, identified by its numeric id in the
/// server's global palette.
///
/// Blocks carry no inline metadata; two blocks are equal
/// iff their ids are equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
    /// Air. Also returned for blocks whose chunk is not loaded.
    pub const AIR: BlockId = BlockId(0);

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}
