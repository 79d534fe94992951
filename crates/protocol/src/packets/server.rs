//! Packets sent by the server during play.

use common::{BlockId, BlockPos, ChunkPos, GameMode, JoinInfo, LocalBlockChange};
use derivative::Derivative;
use uuid::Uuid;

use crate::{
    chat::ChatMessage,
    codec::{Angle, Decode, Reader, VarInt},
    error::Result,
    frame::RawPacket,
    ids::clientbound as id,
    nbt::NamedNbt,
    slot::Slot,
};

/// Number of biome entries sent with a full chunk.
pub const BIOMES_LEN: usize = 1024;

/// Sound positions are sent as fixed-point integers
/// with this many units per block.
pub const SOUND_POS_SCALE: f64 = 8.0;

/// The union of all play packets the client understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerPacket {
    SpawnObject(SpawnObject),
    SpawnMob(SpawnMob),
    SpawnPlayer(SpawnPlayer),
    BlockChange(BlockChange),
    ServerDifficulty(ServerDifficulty),
    Chat(Chat),
    MultiBlockChange(MultiBlockChange),
    CloseWindow(CloseWindow),
    WindowItems(WindowItems),
    SetSlot(SetSlot),
    PluginMessage(PluginMessage),
    NamedSoundEffect(NamedSoundEffect),
    Disconnect(Disconnect),
    KeepAlive(KeepAlive),
    ChunkData(ChunkData),
    JoinGame(JoinGame),
    EntityPosition(EntityPosition),
    EntityPositionAndRotation(EntityPositionAndRotation),
    EntityRotation(EntityRotation),
    PlayerAbilities(PlayerAbilities),
    PlayerPositionAndLook(PlayerPositionAndLook),
    DestroyEntities(DestroyEntities),
    HeldItemChange(HeldItemChange),
    SetExperience(SetExperience),
    UpdateHealth(UpdateHealth),
    SpawnPosition(SpawnPosition),
    SoundEffect(SoundEffect),
}

impl ServerPacket {
    /// Decodes the fields of `raw`. Returns `None` for packet ids
    /// this client does not handle.
    pub fn decode(raw: &RawPacket) -> Result<Option<Self>> {
        let reader = &mut Reader::new(&raw.body);
        let packet = match raw.id {
            id::SPAWN_OBJECT => ServerPacket::SpawnObject(reader.read()?),
            id::SPAWN_MOB => ServerPacket::SpawnMob(reader.read()?),
            id::SPAWN_PLAYER => ServerPacket::SpawnPlayer(reader.read()?),
            id::BLOCK_CHANGE => ServerPacket::BlockChange(reader.read()?),
            id::SERVER_DIFFICULTY => ServerPacket::ServerDifficulty(reader.read()?),
            id::CHAT_MESSAGE => ServerPacket::Chat(reader.read()?),
            id::MULTI_BLOCK_CHANGE => ServerPacket::MultiBlockChange(reader.read()?),
            id::CLOSE_WINDOW => ServerPacket::CloseWindow(reader.read()?),
            id::WINDOW_ITEMS => ServerPacket::WindowItems(reader.read()?),
            id::SET_SLOT => ServerPacket::SetSlot(reader.read()?),
            id::PLUGIN_MESSAGE => ServerPacket::PluginMessage(reader.read()?),
            id::NAMED_SOUND_EFFECT => ServerPacket::NamedSoundEffect(reader.read()?),
            id::DISCONNECT => ServerPacket::Disconnect(reader.read()?),
            id::KEEP_ALIVE => ServerPacket::KeepAlive(reader.read()?),
            id::CHUNK_DATA => ServerPacket::ChunkData(reader.read()?),
            id::JOIN_GAME => ServerPacket::JoinGame(reader.read()?),
            id::ENTITY_POSITION => ServerPacket::EntityPosition(reader.read()?),
            id::ENTITY_POSITION_AND_ROTATION => {
                ServerPacket::EntityPositionAndRotation(reader.read()?)
            }
            id::ENTITY_ROTATION => ServerPacket::EntityRotation(reader.read()?),
            id::PLAYER_ABILITIES => ServerPacket::PlayerAbilities(reader.read()?),
            id::PLAYER_POSITION_AND_LOOK => ServerPacket::PlayerPositionAndLook(reader.read()?),
            id::DESTROY_ENTITIES => ServerPacket::DestroyEntities(reader.read()?),
            id::HELD_ITEM_CHANGE => ServerPacket::HeldItemChange(reader.read()?),
            id::SET_EXPERIENCE => ServerPacket::SetExperience(reader.read()?),
            id::UPDATE_HEALTH => ServerPacket::UpdateHealth(reader.read()?),
            id::SPAWN_POSITION => ServerPacket::SpawnPosition(reader.read()?),
            id::SOUND_EFFECT => ServerPacket::SoundEffect(reader.read()?),
            _ => return Ok(None),
        };
        Ok(Some(packet))
    }
}

fn read_velocity(reader: &mut Reader) -> Result<[i16; 3]> {
    Ok([reader.read()?, reader.read()?, reader.read()?])
}

fn read_pos(reader: &mut Reader) -> Result<[f64; 3]> {
    Ok([reader.read()?, reader.read()?, reader.read()?])
}

fn read_sound_pos(reader: &mut Reader) -> Result<[f64; 3]> {
    let mut pos = [0.0; 3];
    for axis in &mut pos {
        *axis = f64::from(reader.read::<i32>()?) / SOUND_POS_SCALE;
    }
    Ok(pos)
}

/// Spawns a non-living entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnObject {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub kind: i32,
    pub pos: [f64; 3],
    pub pitch: Angle,
    pub yaw: Angle,
    /// Meaning depends on `kind`.
    pub data: i32,
    pub velocity: [i16; 3],
}

impl Decode for SpawnObject {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            uuid: reader.read()?,
            kind: reader.read::<VarInt>()?.0,
            pos: read_pos(reader)?,
            pitch: reader.read()?,
            yaw: reader.read()?,
            data: reader.read()?,
            velocity: read_velocity(reader)?,
        })
    }
}

/// Spawns a living entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnMob {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub kind: i32,
    pub pos: [f64; 3],
    pub yaw: Angle,
    pub pitch: Angle,
    pub head_pitch: Angle,
    pub velocity: [i16; 3],
}

impl Decode for SpawnMob {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            uuid: reader.read()?,
            kind: reader.read::<VarInt>()?.0,
            pos: read_pos(reader)?,
            yaw: reader.read()?,
            pitch: reader.read()?,
            head_pitch: reader.read()?,
            velocity: read_velocity(reader)?,
        })
    }
}

/// Spawns another player that came into view.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlayer {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub pos: [f64; 3],
    pub yaw: Angle,
    pub pitch: Angle,
}

impl Decode for SpawnPlayer {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            uuid: reader.read()?,
            pos: read_pos(reader)?,
            yaw: reader.read()?,
            pitch: reader.read()?,
        })
    }
}

/// A single block changed.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub block: BlockId,
}

impl Decode for BlockChange {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            pos: reader.read()?,
            block: BlockId(reader.read::<VarInt>()?.0 as u32),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerDifficulty {
    pub difficulty: u8,
    pub locked: bool,
}

impl Decode for ServerDifficulty {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            difficulty: reader.read()?,
            locked: reader.read()?,
        })
    }
}

/// A chat message. `position` is 0 for chat, 1 for system
/// messages and 2 for the action bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub message: ChatMessage,
    pub position: i8,
}

impl Decode for Chat {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            message: reader.read()?,
            position: reader.read()?,
        })
    }
}

/// Several blocks changed within one chunk column.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBlockChange {
    pub chunk: ChunkPos,
    pub records: Vec<LocalBlockChange>,
}

impl Decode for MultiBlockChange {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let chunk = ChunkPos::new(reader.read()?, reader.read()?);
        let count = reader.read_len()?;
        let mut records = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            let xz: u8 = reader.read()?;
            let y: u8 = reader.read()?;
            let block = BlockId(reader.read::<VarInt>()?.0 as u32);
            records.push(LocalBlockChange {
                x: xz >> 4,
                y,
                z: xz & 0x0F,
                block,
            });
        }
        Ok(Self { chunk, records })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloseWindow {
    pub window_id: u8,
}

impl Decode for CloseWindow {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            window_id: reader.read()?,
        })
    }
}

/// The full contents of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowItems {
    pub window_id: u8,
    pub slots: Vec<Slot>,
}

impl Decode for WindowItems {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let window_id = reader.read()?;
        let count: i16 = reader.read()?;
        if count < 0 {
            return Err(crate::error::CodecError::NegativeLength(count.into()));
        }
        let mut slots = Vec::with_capacity(count as usize);
        for _ in 0..count {
            slots.push(reader.read()?);
        }
        Ok(Self { window_id, slots })
    }
}

/// One slot of a window changed. Window -1 with slot -1
/// addresses the stack held by the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSlot {
    pub window_id: i8,
    pub slot: i16,
    pub item: Slot,
}

impl Decode for SetSlot {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            window_id: reader.read()?,
            slot: reader.read()?,
            item: reader.read()?,
        })
    }
}

/// Custom data on a named channel. The payload extends to
/// the end of the packet.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub struct PluginMessage {
    pub channel: String,
    #[derivative(Debug = "ignore")]
    pub data: Vec<u8>,
}

impl Decode for PluginMessage {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            channel: reader.read()?,
            data: reader.rest().to_vec(),
        })
    }
}

/// A sound identified by name. Position is in blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSoundEffect {
    pub name: String,
    pub category: i32,
    pub pos: [f64; 3],
    pub volume: f32,
    pub pitch: f32,
}

impl Decode for NamedSoundEffect {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            name: reader.read()?,
            category: reader.read::<VarInt>()?.0,
            pos: read_sound_pos(reader)?,
            volume: reader.read()?,
            pitch: reader.read()?,
        })
    }
}

/// A sound identified by registry id. Position is in blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEffect {
    pub sound_id: i32,
    pub category: i32,
    pub pos: [f64; 3],
    pub volume: f32,
    pub pitch: f32,
}

impl Decode for SoundEffect {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            sound_id: reader.read::<VarInt>()?.0,
            category: reader.read::<VarInt>()?.0,
            pos: read_sound_pos(reader)?,
            volume: reader.read()?,
            pitch: reader.read()?,
        })
    }
}

/// The server is closing the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Disconnect {
    pub reason: ChatMessage,
}

impl Decode for Disconnect {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            reason: reader.read()?,
        })
    }
}

/// Must be echoed back or the server drops us.
#[derive(Debug, Clone, PartialEq)]
pub struct KeepAlive {
    pub id: i64,
}

impl Decode for KeepAlive {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self { id: reader.read()? })
    }
}

/// A chunk column. `data` holds the sections selected by
/// `section_mask` in the paletted section format.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub struct ChunkData {
    pub pos: ChunkPos,
    pub full_chunk: bool,
    pub section_mask: i32,
    #[derivative(Debug = "ignore")]
    pub heightmaps: Option<NamedNbt>,
    /// Present only for full chunks.
    #[derivative(Debug = "ignore")]
    pub biomes: Option<Vec<i32>>,
    #[derivative(Debug = "ignore")]
    pub data: Vec<u8>,
    #[derivative(Debug = "ignore")]
    pub block_entities: Vec<NamedNbt>,
}

impl Decode for ChunkData {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let pos = ChunkPos::new(reader.read()?, reader.read()?);
        let full_chunk = reader.read()?;
        let section_mask = reader.read::<VarInt>()?.0;
        let heightmaps = reader.read()?;

        let biomes = if full_chunk {
            let mut biomes = Vec::with_capacity(BIOMES_LEN);
            for _ in 0..BIOMES_LEN {
                biomes.push(reader.read()?);
            }
            Some(biomes)
        } else {
            None
        };

        let data = reader.read_byte_array()?.to_vec();

        let count = reader.read_len()?;
        let mut block_entities = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            if let Some(nbt) = reader.read::<Option<NamedNbt>>()? {
                block_entities.push(nbt);
            }
        }

        Ok(Self {
            pos,
            full_chunk,
            section_mask,
            heightmaps,
            biomes,
            data,
            block_entities,
        })
    }
}

/// First packet of the play state.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub entity_id: i32,
    /// Bits 0-2: gamemode. Bit 3: hardcore.
    pub gamemode: u8,
    pub dimension: i32,
    pub hashed_seed: i64,
    pub max_players: u8,
    pub level_type: String,
    pub view_distance: i32,
    pub reduced_debug_info: bool,
    pub enable_respawn_screen: bool,
}

impl JoinGame {
    pub fn join_info(&self) -> JoinInfo {
        JoinInfo {
            entity_id: self.entity_id,
            gamemode: GameMode::from(self.gamemode & 0x7),
            hardcore: self.gamemode & 0x8 != 0,
            dimension: self.dimension,
            level_type: self.level_type.clone(),
            view_distance: self.view_distance,
            reduced_debug_info: self.reduced_debug_info,
        }
    }
}

impl Decode for JoinGame {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read()?,
            gamemode: reader.read()?,
            dimension: reader.read()?,
            hashed_seed: reader.read()?,
            max_players: reader.read()?,
            level_type: reader.read()?,
            view_distance: reader.read::<VarInt>()?.0,
            reduced_debug_info: reader.read()?,
            enable_respawn_screen: reader.read()?,
        })
    }
}

/// Deltas are in 1/4096 of a block.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPosition {
    pub entity_id: i32,
    pub delta: [i16; 3],
    pub on_ground: bool,
}

impl Decode for EntityPosition {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            delta: read_velocity(reader)?,
            on_ground: reader.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityPositionAndRotation {
    pub entity_id: i32,
    pub delta: [i16; 3],
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: bool,
}

impl Decode for EntityPositionAndRotation {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            delta: read_velocity(reader)?,
            yaw: reader.read()?,
            pitch: reader.read()?,
            on_ground: reader.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRotation {
    pub entity_id: i32,
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: bool,
}

impl Decode for EntityRotation {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            entity_id: reader.read::<VarInt>()?.0,
            yaw: reader.read()?,
            pitch: reader.read()?,
            on_ground: reader.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAbilities {
    pub flags: i8,
    pub flying_speed: f32,
    pub fov_modifier: f32,
}

impl Decode for PlayerAbilities {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            flags: reader.read()?,
            flying_speed: reader.read()?,
            fov_modifier: reader.read()?,
        })
    }
}

/// Teleports the player. Each bit of `flags` marks the
/// corresponding field as relative.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionAndLook {
    pub pos: [f64; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub flags: u8,
    pub teleport_id: i32,
}

impl Decode for PlayerPositionAndLook {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            pos: read_pos(reader)?,
            yaw: reader.read()?,
            pitch: reader.read()?,
            flags: reader.read()?,
            teleport_id: reader.read::<VarInt>()?.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DestroyEntities {
    pub ids: Vec<i32>,
}

impl Decode for DestroyEntities {
    fn decode(reader: &mut Reader) -> Result<Self> {
        let count = reader.read_len()?;
        let mut ids = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            ids.push(reader.read::<VarInt>()?.0);
        }
        Ok(Self { ids })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeldItemChange {
    pub slot: i8,
}

impl Decode for HeldItemChange {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            slot: reader.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetExperience {
    pub bar: f32,
    pub level: i32,
    pub total: i32,
}

impl Decode for SetExperience {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            bar: reader.read()?,
            level: reader.read::<VarInt>()?.0,
            total: reader.read::<VarInt>()?.0,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHealth {
    pub health: f32,
    pub food: i32,
    pub saturation: f32,
}

impl Decode for UpdateHealth {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self {
            health: reader.read()?,
            food: reader.read::<VarInt>()?.0,
            saturation: reader.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPosition {
    pub pos: BlockPos,
}

impl Decode for SpawnPosition {
    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self { pos: reader.read()? })
    }
}
