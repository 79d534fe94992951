//! Entities known to the client.

use uuid::Uuid;

pub mod player;

/// Relative movement deltas are measured in 1/4096 of a block.
pub const MOVE_DELTA_SCALE: f64 = 4096.0;

/// What kind of entity this is, together with the
/// server's numeric type code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A non-living entity (item, arrow, minecart, ...).
    Object(i32),
    /// A living entity.
    Mob(i32),
    /// Another player.
    Player,
}

/// An entity the server has told us about.
///
/// Only identity and position are retained. Velocity, rotation
/// and equipment are delivered through events.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: i32,
    pub uuid: Uuid,
    pub kind: EntityKind,
    pub pos: [f64; 3],
}

impl Entity {
    pub fn new(id: i32, kind: EntityKind, pos: [f64; 3]) -> Self {
        Self {
            id,
            uuid: Uuid::nil(),
            kind,
            pos,
        }
    }

    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// Applies a relative move as sent by the server.
    pub fn translate(&mut self, delta: [i16; 3]) {
        for (axis, d) in self.pos.iter_mut().zip(delta.iter()) {
            *axis += f64::from(*d) / MOVE_DELTA_SCALE;
        }
    }
}
