//! Packet ids for protocol 578.

/// Packets the server sends during play.
pub mod clientbound {
    pub const SPAWN_OBJECT: i32 = 0x00;
    pub const SPAWN_MOB: i32 = 0x03;
    pub const SPAWN_PLAYER: i32 = 0x05;
    pub const BLOCK_CHANGE: i32 = 0x0C;
    pub const SERVER_DIFFICULTY: i32 = 0x0E;
    pub const CHAT_MESSAGE: i32 = 0x0F;
    pub const MULTI_BLOCK_CHANGE: i32 = 0x10;
    pub const CLOSE_WINDOW: i32 = 0x14;
    pub const WINDOW_ITEMS: i32 = 0x15;
    pub const SET_SLOT: i32 = 0x17;
    pub const PLUGIN_MESSAGE: i32 = 0x19;
    pub const NAMED_SOUND_EFFECT: i32 = 0x1A;
    pub const DISCONNECT: i32 = 0x1B;
    pub const KEEP_ALIVE: i32 = 0x21;
    pub const CHUNK_DATA: i32 = 0x22;
    pub const JOIN_GAME: i32 = 0x26;
    pub const ENTITY_POSITION: i32 = 0x29;
    pub const ENTITY_POSITION_AND_ROTATION: i32 = 0x2A;
    pub const ENTITY_ROTATION: i32 = 0x2B;
    pub const PLAYER_ABILITIES: i32 = 0x32;
    pub const PLAYER_POSITION_AND_LOOK: i32 = 0x36;
    pub const DESTROY_ENTITIES: i32 = 0x38;
    pub const HELD_ITEM_CHANGE: i32 = 0x40;
    pub const SET_EXPERIENCE: i32 = 0x48;
    pub const UPDATE_HEALTH: i32 = 0x49;
    pub const SPAWN_POSITION: i32 = 0x4E;
    pub const SOUND_EFFECT: i32 = 0x52;
}

/// Packets the client sends during play.
pub mod serverbound {
    pub const TELEPORT_CONFIRM: i32 = 0x00;
    pub const CHAT_MESSAGE: i32 = 0x03;
    pub const CLIENT_STATUS: i32 = 0x04;
    pub const CLIENT_SETTINGS: i32 = 0x05;
    pub const PLUGIN_MESSAGE: i32 = 0x0B;
    pub const INTERACT_ENTITY: i32 = 0x0E;
    pub const KEEP_ALIVE: i32 = 0x0F;
    pub const PLAYER_POSITION: i32 = 0x11;
    pub const PLAYER_POSITION_AND_ROTATION: i32 = 0x12;
    pub const PLAYER_ROTATION: i32 = 0x13;
    pub const PICK_ITEM: i32 = 0x17;
    pub const PLAYER_DIGGING: i32 = 0x1A;
    pub const HELD_ITEM_CHANGE: i32 = 0x23;
    pub const ANIMATION: i32 = 0x2A;
    pub const PLAYER_BLOCK_PLACEMENT: i32 = 0x2C;
    pub const USE_ITEM: i32 = 0x2D;
}

/// Handshake and login packets.
pub mod login {
    pub const HANDSHAKE: i32 = 0x00;
    pub const LOGIN_START: i32 = 0x00;
    pub const LOGIN_PLUGIN_RESPONSE: i32 = 0x02;

    pub const DISCONNECT: i32 = 0x00;
    pub const ENCRYPTION_REQUEST: i32 = 0x01;
    pub const LOGIN_SUCCESS: i32 = 0x02;
    pub const SET_COMPRESSION: i32 = 0x03;
    pub const LOGIN_PLUGIN_REQUEST: i32 = 0x04;
}
