//! Packets sent by the client during play.

use common::BlockPos;

use crate::{
    codec::{Encode, VarInt},
    ids::serverbound as id,
    packets::Packet,
};

/// Which hand performs an action.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Hand {
    #[default]
    Main,
    Off,
}

impl Encode for Hand {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(*self as i32).encode(out);
    }
}

/// Face of a block that an action targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Bottom,
    Top,
    North,
    South,
    West,
    East,
}

/// Acknowledges a server teleport.
#[derive(Debug, Clone, PartialEq)]
pub struct TeleportConfirm {
    pub teleport_id: i32,
}

impl Encode for TeleportConfirm {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.teleport_id).encode(out);
    }
}

impl Packet for TeleportConfirm {
    const ID: i32 = id::TELEPORT_CONFIRM;
}

/// A chat line or command typed by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub message: String,
}

impl Encode for Chat {
    fn encode(&self, out: &mut Vec<u8>) {
        self.message.encode(out);
    }
}

impl Packet for Chat {
    const ID: i32 = id::CHAT_MESSAGE;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClientStatus {
    PerformRespawn,
    RequestStats,
}

impl Encode for ClientStatus {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(*self as i32).encode(out);
    }
}

impl Packet for ClientStatus {
    const ID: i32 = id::CLIENT_STATUS;
}

/// Display preferences announced after joining.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub locale: String,
    pub view_distance: i8,
    /// 0: enabled, 1: commands only, 2: hidden.
    pub chat_mode: i32,
    pub chat_colors: bool,
    pub displayed_skin_parts: u8,
    /// 0: left, 1: right.
    pub main_hand: i32,
}

impl Encode for ClientSettings {
    fn encode(&self, out: &mut Vec<u8>) {
        self.locale.encode(out);
        self.view_distance.encode(out);
        VarInt(self.chat_mode).encode(out);
        self.chat_colors.encode(out);
        self.displayed_skin_parts.encode(out);
        VarInt(self.main_hand).encode(out);
    }
}

impl Packet for ClientSettings {
    const ID: i32 = id::CLIENT_SETTINGS;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginMessage {
    pub channel: String,
    pub data: Vec<u8>,
}

impl Encode for PluginMessage {
    fn encode(&self, out: &mut Vec<u8>) {
        self.channel.encode(out);
        out.extend_from_slice(&self.data);
    }
}

impl Packet for PluginMessage {
    const ID: i32 = id::PLUGIN_MESSAGE;
}

/// What an [`InteractEntity`] does.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Interaction {
    Interact(Hand),
    Attack,
    /// `target` is relative to the entity's position.
    InteractAt { target: [f32; 3], hand: Hand },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractEntity {
    pub entity_id: i32,
    pub interaction: Interaction,
}

impl Encode for InteractEntity {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.entity_id).encode(out);
        match self.interaction {
            Interaction::Interact(hand) => {
                VarInt(0).encode(out);
                hand.encode(out);
            }
            Interaction::Attack => VarInt(1).encode(out),
            Interaction::InteractAt { target, hand } => {
                VarInt(2).encode(out);
                target.iter().for_each(|v| v.encode(out));
                hand.encode(out);
            }
        }
    }
}

impl Packet for InteractEntity {
    const ID: i32 = id::INTERACT_ENTITY;
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeepAlive {
    pub id: i64,
}

impl Encode for KeepAlive {
    fn encode(&self, out: &mut Vec<u8>) {
        self.id.encode(out);
    }
}

impl Packet for KeepAlive {
    const ID: i32 = id::KEEP_ALIVE;
}

/// `y` is the feet position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPosition {
    pub pos: [f64; 3],
    pub on_ground: bool,
}

impl Encode for PlayerPosition {
    fn encode(&self, out: &mut Vec<u8>) {
        self.pos.iter().for_each(|v| v.encode(out));
        self.on_ground.encode(out);
    }
}

impl Packet for PlayerPosition {
    const ID: i32 = id::PLAYER_POSITION;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndRotation {
    pub pos: [f64; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Encode for PlayerPositionAndRotation {
    fn encode(&self, out: &mut Vec<u8>) {
        self.pos.iter().for_each(|v| v.encode(out));
        self.yaw.encode(out);
        self.pitch.encode(out);
        self.on_ground.encode(out);
    }
}

impl Packet for PlayerPositionAndRotation {
    const ID: i32 = id::PLAYER_POSITION_AND_ROTATION;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

impl Encode for PlayerRotation {
    fn encode(&self, out: &mut Vec<u8>) {
        self.yaw.encode(out);
        self.pitch.encode(out);
        self.on_ground.encode(out);
    }
}

impl Packet for PlayerRotation {
    const ID: i32 = id::PLAYER_ROTATION;
}

/// Swaps the given inventory slot into the hotbar.
#[derive(Debug, Clone, PartialEq)]
pub struct PickItem {
    pub slot: i32,
}

impl Encode for PickItem {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.slot).encode(out);
    }
}

impl Packet for PickItem {
    const ID: i32 = id::PICK_ITEM;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiggingStatus {
    Started,
    Cancelled,
    Finished,
    DropItemStack,
    DropItem,
    /// Also finishes eating.
    ReleaseUseItem,
    SwapItemInHand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDigging {
    pub status: DiggingStatus,
    pub pos: BlockPos,
    pub face: Face,
}

impl Encode for PlayerDigging {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.status as i32).encode(out);
        self.pos.encode(out);
        (self.face as i8).encode(out);
    }
}

impl Packet for PlayerDigging {
    const ID: i32 = id::PLAYER_DIGGING;
}

/// Selects a hotbar slot (0 to 8).
#[derive(Debug, Clone, PartialEq)]
pub struct HeldItemChange {
    pub slot: i16,
}

impl Encode for HeldItemChange {
    fn encode(&self, out: &mut Vec<u8>) {
        self.slot.encode(out);
    }
}

impl Packet for HeldItemChange {
    const ID: i32 = id::HELD_ITEM_CHANGE;
}

/// Swings an arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub hand: Hand,
}

impl Encode for Animation {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hand.encode(out);
    }
}

impl Packet for Animation {
    const ID: i32 = id::ANIMATION;
}

/// Uses the held item on a block face.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBlockPlacement {
    pub hand: Hand,
    pub pos: BlockPos,
    pub face: Face,
    /// Position on the face, each in `0.0..=1.0`.
    pub cursor: [f32; 3],
    pub inside_block: bool,
}

impl Encode for PlayerBlockPlacement {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hand.encode(out);
        self.pos.encode(out);
        VarInt(self.face as i32).encode(out);
        self.cursor.iter().for_each(|v| v.encode(out));
        self.inside_block.encode(out);
    }
}

impl Packet for PlayerBlockPlacement {
    const ID: i32 = id::PLAYER_BLOCK_PLACEMENT;
}

/// Uses the held item without a target.
#[derive(Debug, Clone, PartialEq)]
pub struct UseItem {
    pub hand: Hand,
}

impl Encode for UseItem {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hand.encode(out);
    }
}

impl Packet for UseItem {
    const ID: i32 = id::USE_ITEM;
}
