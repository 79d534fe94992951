//! The client's view of the world: loaded chunks and known entities.

use ahash::AHashMap;

use crate::{
    chunk::{CHUNK_HEIGHT, SECTION_DIM},
    BlockId, Chunk, ChunkPos, Entity,
};

/// Position of a block in the world. Measured in blocks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Determines the chunk column containing this block.
    pub fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: self.x.div_euclid(SECTION_DIM as i32),
            z: self.z.div_euclid(SECTION_DIM as i32),
        }
    }

    /// Determines the position of this block relative to its chunk column,
    /// or `None` if `y` is outside the column height.
    pub fn chunk_local(self) -> Option<(usize, usize, usize)> {
        if self.y < 0 || self.y >= CHUNK_HEIGHT as i32 {
            return None;
        }
        Some((
            self.x.rem_euclid(SECTION_DIM as i32) as usize,
            self.y as usize,
            self.z.rem_euclid(SECTION_DIM as i32) as usize,
        ))
    }
}

/// A block update inside a single chunk column, as carried by
/// multi-block change packets. Coordinates are column-local.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalBlockChange {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub block: BlockId,
}

/// Records everything the server has told us about the world.
///
/// Chunks are inserted when the server sends them and are
/// never evicted. Block updates that reference a chunk we
/// do not know about are dropped: the server may send them
/// before the chunk itself.
#[derive(Default)]
pub struct World {
    chunks: AHashMap<ChunkPos, Chunk>,
    entities: AHashMap<i32, Entity>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a chunk, replacing any chunk already loaded at `pos`.
    pub fn load_chunk(&mut self, pos: ChunkPos, chunk: Chunk) {
        self.chunks.insert(pos, chunk);
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Returns the number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Gets the block at `pos`. Returns air if the chunk
    /// is not loaded or `pos` is above or below the world.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        let (x, y, z) = match pos.chunk_local() {
            Some(local) => local,
            None => return BlockId::AIR,
        };
        match self.chunk(pos.chunk()) {
            Some(chunk) => chunk.get(x, y, z),
            None => BlockId::AIR,
        }
    }

    /// Sets the block at `pos`. Does nothing if the chunk or
    /// its section is not loaded.
    pub fn set_block(&mut self, pos: BlockPos, block: BlockId) {
        let applied = match (pos.chunk_local(), self.chunks.get_mut(&pos.chunk())) {
            (Some((x, y, z)), Some(chunk)) => chunk.set(x, y, z, block),
            _ => false,
        };
        if !applied {
            log::trace!("Dropped block change at {:?}: chunk not loaded", pos);
        }
    }

    /// Applies `changes` to the chunk at `pos` in order, so later
    /// entries win when two of them address the same block.
    ///
    /// Does nothing if the chunk is not loaded.
    pub fn set_blocks_batch(&mut self, pos: ChunkPos, changes: &[LocalBlockChange]) {
        let chunk = match self.chunks.get_mut(&pos) {
            Some(chunk) => chunk,
            None => {
                log::trace!(
                    "Dropped {} block changes in {:?}: chunk not loaded",
                    changes.len(),
                    pos
                );
                return;
            }
        };

        for change in changes {
            if change.x as usize >= SECTION_DIM || change.z as usize >= SECTION_DIM {
                continue;
            }
            chunk.set(
                change.x as usize,
                change.y as usize,
                change.z as usize,
                change.block,
            );
        }
    }

    /// Inserts an entity, replacing any entity with the same id.
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn entity(&self, id: i32) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: i32) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Removes the given entities. Unknown ids are ignored.
    pub fn remove_entities(&mut self, ids: &[i32]) {
        for id in ids {
            self.entities.remove(id);
        }
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
