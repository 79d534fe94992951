use common::{BlockPos, Player, World};
use protocol::Slot;

/// Number of slots in the player inventory window, including
/// crafting, armor and the off hand.
pub const INVENTORY_SIZE: usize = 46;

/// Uberstruct containing the game state: the player, the world
/// and everything else the server has told us.
///
/// Game state is limited to the client's knowledge. Chunks and
/// entities outside of the view distance are not known.
pub struct Game {
    /// The player using this client.
    player: Player,

    /// Loaded chunks and known entities.
    world: World,

    /// Contents of the player inventory window (window 0).
    inventory: Vec<Slot>,
    /// The stack held by the mouse cursor.
    cursor: Slot,

    difficulty: u8,
    difficulty_locked: bool,

    /// Where the compass points. Unknown until the server sends it.
    spawn_position: Option<BlockPos>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            world: World::new(),
            inventory: vec![Slot::empty(); INVENTORY_SIZE],
            cursor: Slot::empty(),
            difficulty: 0,
            difficulty_locked: false,
            spawn_position: None,
        }
    }

    /// Gets the player using this client.
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Gets the [`World`](common::World) containing chunks and entities.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Gets the player inventory, indexed by window slot.
    pub fn inventory(&self) -> &[Slot] {
        &self.inventory
    }

    /// Gets the stack in the given hotbar slot (0 to 8).
    pub fn hotbar(&self, slot: u8) -> Option<&Slot> {
        self.inventory.get(36 + slot as usize)
    }

    /// Gets the stack in the currently selected hotbar slot.
    pub fn held_item(&self) -> Option<&Slot> {
        self.hotbar(self.player.held_item)
    }

    pub fn cursor(&self) -> &Slot {
        &self.cursor
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn is_difficulty_locked(&self) -> bool {
        self.difficulty_locked
    }

    pub fn spawn_position(&self) -> Option<BlockPos> {
        self.spawn_position
    }

    pub(crate) fn set_inventory(&mut self, slots: &[Slot]) {
        self.inventory.clear();
        self.inventory.extend_from_slice(slots);
        self.inventory.resize(INVENTORY_SIZE.max(slots.len()), Slot::empty());
    }

    /// Replaces one inventory slot. Out-of-range indices are ignored.
    pub(crate) fn set_inventory_slot(&mut self, index: i16, slot: Slot) -> bool {
        match usize::try_from(index).ok().and_then(|i| self.inventory.get_mut(i)) {
            Some(target) => {
                *target = slot;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_cursor(&mut self, slot: Slot) {
        self.cursor = slot;
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: u8, locked: bool) {
        self.difficulty = difficulty;
        self.difficulty_locked = locked;
    }

    pub(crate) fn set_spawn_position(&mut self, pos: BlockPos) {
        self.spawn_position = Some(pos);
    }
}
