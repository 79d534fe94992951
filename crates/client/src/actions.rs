//! [`Context`], the view of a session given to tasks and event
//! handlers, and the outbound actions available through it.

use common::{BlockPos, Player, World};
use protocol::{
    packets::client::{
        Animation, Chat, ClientStatus, DiggingStatus, Face, Hand, HeldItemChange, InteractEntity,
        Interaction, PickItem, PlayerBlockPlacement, PlayerDigging, PlayerPosition,
        PlayerPositionAndRotation, PlayerRotation, PluginMessage, UseItem,
    },
    Packet,
};

use crate::{
    conn::PacketWrite,
    error::{ActionError, SessionError},
    game::Game,
    names::NameLookup,
};

/// Longest chat message the server accepts, in bytes.
pub const MAX_CHAT_LEN: usize = 256;

/// Access to the game state and the outbound packet stream.
///
/// Only ever exists on the session thread.
pub struct Context<'a> {
    out: &'a mut dyn PacketWrite,
    game: &'a mut Game,
    names: &'a dyn NameLookup,
}

impl<'a> Context<'a> {
    pub fn new(out: &'a mut dyn PacketWrite, game: &'a mut Game, names: &'a dyn NameLookup) -> Self {
        Self { out, game, names }
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        self.game
    }

    pub fn player(&self) -> &Player {
        self.game.player()
    }

    pub fn world(&self) -> &World {
        self.game.world()
    }

    pub fn names(&self) -> &dyn NameLookup {
        self.names
    }

    /// Encodes and writes a packet.
    pub fn send<P: Packet>(&mut self, packet: &P) -> Result<(), SessionError> {
        self.out.write_raw(P::ID, &packet.body())
    }

    /// Writes a packet whose fields are already encoded.
    pub fn send_raw(&mut self, id: i32, body: &[u8]) -> Result<(), SessionError> {
        self.out.write_raw(id, body)
    }

    /// Sends a chat message or command.
    pub fn chat(&mut self, message: &str) -> Result<(), ActionError> {
        if message.len() > MAX_CHAT_LEN {
            return Err(ActionError::MessageTooLong(message.len()));
        }
        self.send(&Chat {
            message: message.to_owned(),
        })?;
        Ok(())
    }

    /// Plays the arm swing animation. Purely visual.
    pub fn swing_arm(&mut self, hand: Hand) -> Result<(), SessionError> {
        self.send(&Animation { hand })
    }

    /// Asks to respawn after death.
    pub fn respawn(&mut self) -> Result<(), SessionError> {
        self.send(&ClientStatus::PerformRespawn)
    }

    /// Uses the item in `hand` (eating, drawing a bow, ...).
    pub fn use_item(&mut self, hand: Hand) -> Result<(), SessionError> {
        self.send(&UseItem { hand })
    }

    /// Finishes using an item, for example releasing a bow.
    pub fn use_item_end(&mut self) -> Result<(), SessionError> {
        self.player_action(DiggingStatus::ReleaseUseItem)
    }

    /// Right-clicks an entity. The server only accepts this for
    /// visible entities within four blocks.
    pub fn use_entity(&mut self, entity_id: i32, hand: Hand) -> Result<(), SessionError> {
        self.send(&InteractEntity {
            entity_id,
            interaction: Interaction::Interact(hand),
        })
    }

    /// Right-clicks a point on an entity, relative to its position.
    pub fn use_entity_at(
        &mut self,
        entity_id: i32,
        target: [f32; 3],
        hand: Hand,
    ) -> Result<(), SessionError> {
        self.send(&InteractEntity {
            entity_id,
            interaction: Interaction::InteractAt { target, hand },
        })
    }

    /// Left-clicks an entity.
    pub fn attack_entity(&mut self, entity_id: i32) -> Result<(), SessionError> {
        self.send(&InteractEntity {
            entity_id,
            interaction: Interaction::Attack,
        })
    }

    pub fn plugin_message(&mut self, channel: &str, data: &[u8]) -> Result<(), SessionError> {
        self.send(&PluginMessage {
            channel: channel.to_owned(),
            data: data.to_vec(),
        })
    }

    /// Places or uses a block. `cursor` is the point on `face`
    /// the crosshair is on, each axis in `0.0..=1.0`.
    pub fn use_block(
        &mut self,
        hand: Hand,
        pos: BlockPos,
        face: Face,
        cursor: [f32; 3],
        inside_block: bool,
    ) -> Result<(), SessionError> {
        self.send(&PlayerBlockPlacement {
            hand,
            pos,
            face,
            cursor,
            inside_block,
        })
    }

    /// Selects a hotbar slot.
    pub fn select_item(&mut self, slot: i32) -> Result<(), ActionError> {
        if !(0..=8).contains(&slot) {
            return Err(ActionError::InvalidHotbarSlot(slot));
        }
        self.send(&HeldItemChange { slot: slot as i16 })?;
        self.game.player_mut().held_item = slot as u8;
        Ok(())
    }

    /// Moves the stack in the given inventory slot to the hotbar
    /// and selects it, as the middle click does.
    pub fn pick_item(&mut self, slot: i32) -> Result<(), SessionError> {
        self.send(&PickItem { slot })
    }

    /// Starts, cancels or finishes digging. Breaking a block takes
    /// a `Started` followed by a `Finished`.
    pub fn dig(&mut self, status: DiggingStatus, pos: BlockPos, face: Face) -> Result<(), SessionError> {
        self.send(&PlayerDigging { status, pos, face })
    }

    /// Drops the whole selected stack.
    pub fn drop_item_stack(&mut self) -> Result<(), SessionError> {
        self.player_action(DiggingStatus::DropItemStack)
    }

    /// Drops one item of the selected stack.
    pub fn drop_item(&mut self) -> Result<(), SessionError> {
        self.player_action(DiggingStatus::DropItem)
    }

    /// Swaps the items in the main and off hands.
    pub fn swap_items(&mut self) -> Result<(), SessionError> {
        self.player_action(DiggingStatus::SwapItemInHand)
    }

    fn player_action(&mut self, status: DiggingStatus) -> Result<(), SessionError> {
        self.dig(status, BlockPos::default(), Face::Bottom)
    }

    /// Moves the player. The server ignores moves that are too large.
    pub fn set_position(&mut self, pos: [f64; 3], on_ground: bool) -> Result<(), SessionError> {
        let player = self.game.player_mut();
        [player.x, player.y, player.z] = pos;
        player.on_ground = on_ground;
        self.send(&PlayerPosition { pos, on_ground })
    }

    pub fn set_position_and_look(
        &mut self,
        pos: [f64; 3],
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    ) -> Result<(), SessionError> {
        let player = self.game.player_mut();
        [player.x, player.y, player.z] = pos;
        player.yaw = yaw;
        player.pitch = pitch;
        player.on_ground = on_ground;
        self.send_position()
    }

    /// Sends the player's current absolute position and rotation.
    pub fn send_position(&mut self) -> Result<(), SessionError> {
        let player = self.game.player();
        let packet = PlayerPositionAndRotation {
            pos: player.position(),
            yaw: player.yaw,
            pitch: player.pitch,
            on_ground: player.on_ground,
        };
        self.send(&packet)
    }

    /// Turns the player to face a point.
    pub fn look_at(&mut self, target: [f64; 3]) -> Result<(), SessionError> {
        let (yaw, pitch) = look_angles(self.game.player().position(), target);
        self.look_yaw_pitch(yaw, pitch)
    }

    /// Sets the player's rotation. `yaw` is in `[0, 360)` and
    /// `pitch` in `[-90, 90]`.
    pub fn look_yaw_pitch(&mut self, yaw: f32, pitch: f32) -> Result<(), SessionError> {
        let player = self.game.player_mut();
        player.yaw = yaw;
        player.pitch = pitch;
        let on_ground = player.on_ground;
        self.send(&PlayerRotation {
            yaw,
            pitch,
            on_ground,
        })
    }
}

/// Computes the yaw and pitch, in degrees, for looking from `from` at `to`.
pub fn look_angles(from: [f64; 3], to: [f64; 3]) -> (f32, f32) {
    let [dx, dy, dz] = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];
    let r = (dx * dx + dy * dy + dz * dz).sqrt();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    let yaw = (-dx.atan2(dz).to_degrees()).rem_euclid(360.0);
    let pitch = -(dy / r).asin().to_degrees();
    (yaw as f32, pitch as f32)
}

#[cfg(test)]
mod tests {
    use protocol::ids::serverbound as id;

    use crate::{names::NoNames, test_util::Sink};

    use super::*;

    fn with_context<R>(f: impl FnOnce(&mut Context) -> R) -> (R, Sink, Game) {
        let (mut sink, mut game) = (Sink::default(), Game::new());
        let r = f(&mut Context::new(&mut sink, &mut game, &NoNames));
        (r, sink, game)
    }

    #[test]
    fn chat_limit() {
        let (result, sink, _) = with_context(|cx| cx.chat(&"a".repeat(257)));
        assert!(matches!(result, Err(ActionError::MessageTooLong(257))));
        assert!(sink.packets.is_empty());

        let (result, sink, _) = with_context(|cx| cx.chat(&"a".repeat(256)));
        assert!(result.is_ok());
        assert_eq!(sink.ids(), vec![id::CHAT_MESSAGE]);
        assert_eq!(sink.field::<String>(0).len(), 256);
    }

    #[test]
    fn select_item_range() {
        let (result, sink, _) = with_context(|cx| cx.select_item(9));
        assert!(matches!(result, Err(ActionError::InvalidHotbarSlot(9))));
        assert!(sink.packets.is_empty());

        let (result, sink, game) = with_context(|cx| cx.select_item(4));
        assert!(result.is_ok());
        assert_eq!(sink.field::<i16>(0), 4);
        assert_eq!(game.player().held_item, 4);
    }

    #[test]
    fn moves_update_player() {
        let (result, sink, game) = with_context(|cx| {
            cx.set_position([1.0, 64.0, -2.5], true)?;
            cx.look_yaw_pitch(90.0, 10.0)
        });
        result.unwrap();
        assert_eq!(sink.ids(), vec![id::PLAYER_POSITION, id::PLAYER_ROTATION]);
        assert_eq!(game.player().position(), [1.0, 64.0, -2.5]);
        assert_eq!(game.player().yaw, 90.0);
        assert!(game.player().on_ground);
    }

    #[test]
    fn player_actions_use_digging() {
        let (result, sink, _) = with_context(|cx| {
            cx.drop_item()?;
            cx.swap_items()
        });
        result.unwrap();
        assert_eq!(sink.ids(), vec![id::PLAYER_DIGGING, id::PLAYER_DIGGING]);
        assert_eq!(sink.packets[0].1[0], 4);
        assert_eq!(sink.packets[1].1[0], 6);
    }

    #[test]
    fn look_directions() {
        let from = [0.0, 0.0, 0.0];
        assert_eq!(look_angles(from, [0.0, 0.0, 1.0]), (0.0, 0.0));
        let (yaw, pitch) = look_angles(from, [-1.0, 0.0, 0.0]);
        assert!((yaw - 90.0).abs() < 1e-4);
        assert_eq!(pitch, 0.0);
        let (_, pitch) = look_angles(from, [0.0, 1.0, 0.0]);
        assert!((pitch + 90.0).abs() < 1e-4);
    }
}
