//! The local player.

/// Gamemodes, as encoded in the low three bits of the join packet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
    Unknown(u8),
}

impl From<u8> for GameMode {
    fn from(value: u8) -> Self {
        match value {
            0 => GameMode::Survival,
            1 => GameMode::Creative,
            2 => GameMode::Adventure,
            3 => GameMode::Spectator,
            x => GameMode::Unknown(x),
        }
    }
}

/// Movement and vision abilities granted by the server.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Abilities {
    /// Bit 0: invulnerable, 1: flying, 2: may fly, 3: instant break.
    pub flags: i8,
    pub flying_speed: f32,
    pub fov_modifier: f32,
}

impl Abilities {
    pub fn invulnerable(&self) -> bool {
        self.flags & 0x01 != 0
    }

    pub fn flying(&self) -> bool {
        self.flags & 0x02 != 0
    }

    pub fn may_fly(&self) -> bool {
        self.flags & 0x04 != 0
    }

    pub fn instant_break(&self) -> bool {
        self.flags & 0x08 != 0
    }
}

/// Fields of the join packet that describe the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinInfo {
    pub entity_id: i32,
    pub gamemode: GameMode,
    pub hardcore: bool,
    pub dimension: i32,
    pub level_type: String,
    pub view_distance: i32,
    pub reduced_debug_info: bool,
}

/// Which of the five position fields in a teleport are relative.
/// A set bit means the value is added to the current one.
pub mod relative {
    pub const X: u8 = 0x01;
    pub const Y: u8 = 0x02;
    pub const Z: u8 = 0x04;
    pub const YAW: u8 = 0x08;
    pub const PITCH: u8 = 0x10;
}

/// The player using this client.
#[derive(Clone, Debug, Default)]
pub struct Player {
    pub entity_id: i32,
    pub gamemode: GameMode,
    pub hardcore: bool,
    pub dimension: i32,
    pub level_type: String,
    pub view_distance: i32,
    pub reduced_debug_info: bool,

    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,

    /// Selected hotbar slot, 0 to 8.
    pub held_item: u8,

    /// Zero until the server reports it.
    pub health: f32,
    pub food: i32,
    pub food_saturation: f32,
    dead: bool,

    pub experience_bar: f32,
    pub level: i32,
    pub total_experience: i32,

    pub abilities: Abilities,
}

impl Player {
    /// Creates a player with every field zeroed. Health stays
    /// zero until the server reports it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes identity fields from the join packet.
    /// Must only be called once, at session start.
    pub fn apply_join(&mut self, join: JoinInfo) {
        self.entity_id = join.entity_id;
        self.gamemode = join.gamemode;
        self.hardcore = join.hardcore;
        self.dimension = join.dimension;
        self.level_type = join.level_type;
        self.view_distance = join.view_distance;
        self.reduced_debug_info = join.reduced_debug_info;
    }

    /// Applies a server teleport. For each of x, y, z, yaw and pitch,
    /// the matching bit in `flags` (see [`relative`]) selects whether the
    /// value is a delta or an absolute replacement.
    pub fn apply_position_update(&mut self, pos: [f64; 3], yaw: f32, pitch: f32, flags: u8) {
        fn apply<T: std::ops::AddAssign + Copy>(current: &mut T, value: T, relative: bool) {
            if relative {
                *current += value;
            } else {
                *current = value;
            }
        }

        apply(&mut self.x, pos[0], flags & relative::X != 0);
        apply(&mut self.y, pos[1], flags & relative::Y != 0);
        apply(&mut self.z, pos[2], flags & relative::Z != 0);
        apply(&mut self.yaw, yaw, flags & relative::YAW != 0);
        apply(&mut self.pitch, pitch, flags & relative::PITCH != 0);
    }

    /// Updates vitals. Returns whether this update killed the player.
    ///
    /// A death is reported once: further updates below 1.0 do not
    /// report it again until health has been restored to at least 1.0.
    pub fn apply_health_update(&mut self, health: f32, food: i32, food_saturation: f32) -> bool {
        self.health = health;
        self.food = food;
        self.food_saturation = food_saturation;

        if health < 1.0 {
            let became_dead = !self.dead;
            self.dead = true;
            became_dead
        } else {
            self.dead = false;
            false
        }
    }

    /// Whether the last health update left the player dead.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn apply_experience(&mut self, bar: f32, level: i32, total: i32) {
        self.experience_bar = bar;
        self.level = level;
        self.total_experience = total;
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns the position of the block at the player's feet.
    pub fn block_pos(&self) -> crate::BlockPos {
        crate::BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: f64, y: f64, z: f64) -> Player {
        let mut player = Player::new();
        player.x = x;
        player.y = y;
        player.z = z;
        player
    }

    #[test]
    fn absolute_teleport() {
        let mut player = player_at(10.0, 20.0, 30.0);
        player.apply_position_update([1.0, 2.0, 3.0], 0.0, 0.0, 0);
        assert_eq!(player.position(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn relative_teleport() {
        let mut player = player_at(10.0, 20.0, 30.0);
        player.yaw = 90.0;
        let all = relative::X | relative::Y | relative::Z | relative::YAW | relative::PITCH;
        player.apply_position_update([1.0, 2.0, 3.0], 0.0, 0.0, all);
        assert_eq!(player.position(), [11.0, 22.0, 33.0]);
        assert_eq!(player.yaw, 90.0);
    }

    #[test]
    fn mixed_teleport() {
        let mut player = player_at(10.0, 20.0, 30.0);
        player.apply_position_update([1.0, 2.0, 3.0], 45.0, 5.0, relative::Y);
        assert_eq!(player.position(), [1.0, 22.0, 3.0]);
        assert_eq!(player.yaw, 45.0);
        assert_eq!(player.pitch, 5.0);
    }

    #[test]
    fn death_reported_once() {
        let mut player: Player = Player::new();
        assert!(!player.apply_health_update(5.0, 20, 5.0));
        assert!(player.apply_health_update(0.5, 20, 5.0));
        assert!(!player.apply_health_update(0.2, 20, 5.0));
        assert!(player.is_dead());

        // respawn
        assert!(!player.apply_health_update(20.0, 20, 5.0));
        assert!(player.apply_health_update(0.0, 20, 5.0));
    }

    #[test]
    fn block_pos_rounds_down() {
        let player = player_at(-0.5, 64.99, 15.0);
        assert_eq!(player.block_pos(), crate::BlockPos::new(-1, 64, 15));
    }

    #[test]
    fn join_sets_identity() {
        let mut player: Player = Player::new();
        player.apply_join(JoinInfo {
            entity_id: 42,
            gamemode: GameMode::from(1),
            hardcore: true,
            dimension: -1,
            level_type: "default".to_owned(),
            view_distance: 10,
            reduced_debug_info: false,
        });
        assert_eq!(player.entity_id, 42);
        assert_eq!(player.gamemode, GameMode::Creative);
        assert!(player.hardcore);
        assert_eq!(player.dimension, -1);
    }
}
