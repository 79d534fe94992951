//! Chunk columns and their sections.

use crate::BlockId;

/// The width of a section (cube) along each axis.
pub const SECTION_DIM: usize = 16;
/// The number of blocks in a section.
pub const SECTION_VOLUME: usize = SECTION_DIM * SECTION_DIM * SECTION_DIM;
/// The number of sections stacked in a chunk column.
pub const SECTIONS_PER_CHUNK: usize = 16;
/// The height of a chunk column in blocks.
pub const CHUNK_HEIGHT: usize = SECTION_DIM * SECTIONS_PER_CHUNK;

/// Position of a chunk column. Measured in units of 16 blocks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// A dense 16x16x16 grid of blocks.
#[derive(Clone, PartialEq, Eq)]
pub struct Section {
    /// Ordering: slices from Y=0 to Y=15, each containing rows
    /// from Z=0 to Z=15, each of which contains blocks from X=0 to X=15.
    blocks: Box<[BlockId]>,
}

impl Section {
    /// Creates a section filled with air.
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockId::AIR; SECTION_VOLUME].into_boxed_slice(),
        }
    }

    /// Gets the block at the given position within this section.
    ///
    /// # Panics
    /// Panics if `x, y, or z >= SECTION_DIM`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[Self::ordinal(x, y, z)]
    }

    /// Sets the block at the given position within this section.
    ///
    /// # Panics
    /// Panics if `x, y, or z >= SECTION_DIM`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) {
        self.blocks[Self::ordinal(x, y, z)] = block;
    }

    /// Sets the block at the given ordinal, which is
    /// `(y * 16 + z) * 16 + x`.
    pub fn set_ordinal(&mut self, ordinal: usize, block: BlockId) {
        self.blocks[ordinal] = block;
    }

    /// Returns the number of blocks that are not air.
    pub fn non_air_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    pub fn ordinal(x: usize, y: usize, z: usize) -> usize {
        assert!(x < SECTION_DIM, "x coordinate {} out of bounds", x);
        assert!(y < SECTION_DIM, "y coordinate {} out of bounds", y);
        assert!(z < SECTION_DIM, "z coordinate {} out of bounds", z);
        (y * SECTION_DIM + z) * SECTION_DIM + x
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("non_air", &self.non_air_count())
            .finish()
    }
}

/// A column of 16 vertically stacked sections.
///
/// Sections the server did not send are `None` and
/// read as air.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    sections: [Option<Section>; SECTIONS_PER_CHUNK],
}

impl Chunk {
    /// Creates a chunk with no sections present.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)?.as_ref()
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)?.as_mut()
    }

    /// Inserts a section, replacing any existing one at `index`.
    ///
    /// # Panics
    /// Panics if `index >= SECTIONS_PER_CHUNK`.
    pub fn set_section(&mut self, index: usize, section: Section) {
        self.sections[index] = Some(section);
    }

    /// Moves the sections present in `other` into this chunk,
    /// replacing the sections at the same heights.
    pub fn merge(&mut self, other: Chunk) {
        for (slot, section) in self.sections.iter_mut().zip(other.sections) {
            if section.is_some() {
                *slot = section;
            }
        }
    }

    /// Returns a bitmask with one bit set per present section.
    pub fn section_mask(&self) -> u16 {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    /// Gets the block at the given column-local position.
    /// `y` ranges over the full column height.
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockId {
        match self.section(y / SECTION_DIM) {
            Some(section) => section.get(x, y % SECTION_DIM, z),
            None => BlockId::AIR,
        }
    }

    /// Sets the block at the given column-local position.
    ///
    /// Returns `false` and does nothing if the containing
    /// section is not present.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: BlockId) -> bool {
        match self.section_mut(y / SECTION_DIM) {
            Some(section) => {
                section.set(x, y % SECTION_DIM, z, block);
                true
            }
            None => false,
        }
    }
}
