//! Client-side game state: the local player, loaded chunks, and
//! known entities. Mutated only by the session that owns it.

pub mod block;
pub mod chunk;
pub mod entity;
pub mod world;

pub use block::BlockId;
pub use chunk::{Chunk, ChunkPos, Section};
pub use entity::{
    player::{Abilities, GameMode, JoinInfo, Player},
    Entity, EntityKind,
};
pub use world::{BlockPos, LocalBlockChange, World};
