//! Built-in handling of play packets: state updates, mandatory
//! replies and events.

use common::{Abilities, Entity, EntityKind};
use protocol::{
    packets::{
        client::{self, ClientSettings, TeleportConfirm},
        server::*,
    },
    ChatMessage,
};

use crate::{
    actions::Context,
    decoder::ChunkDecoder,
    error::SessionError,
    event::{self, EventBus},
};

/// What the session does after a packet.
pub(crate) enum Flow {
    Continue,
    /// The server ended the session.
    Disconnect(ChatMessage),
}

type Result<T = (), E = SessionError> = std::result::Result<T, E>;

/// Applies decoded packets. Lives for one packet.
pub(crate) struct Dispatch<'a> {
    pub events: &'a mut EventBus,
    pub decoder: &'a dyn ChunkDecoder,
    pub settings: &'a ClientSettings,
}

impl Dispatch<'_> {
    /// Handles a packet. Events are only raised once the packet's
    /// state update and replies have succeeded.
    pub fn handle(&mut self, cx: &mut Context, packet: ServerPacket) -> Result<Flow> {
        match packet {
            ServerPacket::JoinGame(p) => self.join_game(cx, p)?,
            ServerPacket::Disconnect(p) => return self.disconnect(cx, p),
            ServerPacket::KeepAlive(p) => cx.send(&client::KeepAlive { id: p.id })?,
            ServerPacket::PlayerPositionAndLook(p) => self.position_and_look(cx, p)?,
            ServerPacket::PlayerAbilities(p) => self.abilities(cx, p)?,
            ServerPacket::UpdateHealth(p) => self.update_health(cx, p)?,
            ServerPacket::SetExperience(p) => self.set_experience(cx, p)?,
            ServerPacket::HeldItemChange(p) => self.held_item_change(cx, p)?,
            ServerPacket::ServerDifficulty(p) => {
                cx.game_mut().set_difficulty(p.difficulty, p.locked);
            }
            ServerPacket::SpawnPosition(p) => cx.game_mut().set_spawn_position(p.pos),
            ServerPacket::Chat(p) => self.events.emit(
                cx,
                &event::ChatReceived {
                    message: p.message,
                    position: p.position,
                },
            )?,
            ServerPacket::PluginMessage(p) => self.events.emit(
                cx,
                &event::PluginMessage {
                    channel: p.channel,
                    data: p.data,
                },
            )?,
            ServerPacket::SoundEffect(p) => self.sound_effect(cx, p)?,
            ServerPacket::NamedSoundEffect(p) => self.named_sound_effect(cx, p)?,

            ServerPacket::ChunkData(p) => self.chunk_data(cx, p)?,
            ServerPacket::BlockChange(p) => cx.game_mut().world_mut().set_block(p.pos, p.block),
            ServerPacket::MultiBlockChange(p) => {
                cx.game_mut()
                    .world_mut()
                    .set_blocks_batch(p.chunk, &p.records);
            }

            ServerPacket::WindowItems(p) => self.window_items(cx, p)?,
            ServerPacket::SetSlot(p) => self.set_slot(cx, p)?,
            ServerPacket::CloseWindow(p) => self.events.emit(
                cx,
                &event::WindowClosed {
                    window_id: p.window_id,
                },
            )?,

            ServerPacket::SpawnObject(p) => {
                let entity =
                    Entity::new(p.entity_id, EntityKind::Object(p.kind), p.pos).with_uuid(p.uuid);
                cx.game_mut().world_mut().add_entity(entity);
                self.events.emit(cx, &event::ObjectSpawned(p))?;
            }
            ServerPacket::SpawnMob(p) => {
                let entity =
                    Entity::new(p.entity_id, EntityKind::Mob(p.kind), p.pos).with_uuid(p.uuid);
                cx.game_mut().world_mut().add_entity(entity);
                self.events.emit(cx, &event::MobSpawned(p))?;
            }
            ServerPacket::SpawnPlayer(p) => {
                let entity = Entity::new(p.entity_id, EntityKind::Player, p.pos).with_uuid(p.uuid);
                cx.game_mut().world_mut().add_entity(entity);
                self.events.emit(cx, &event::PlayerSpawned(p))?;
            }
            ServerPacket::DestroyEntities(p) => {
                cx.game_mut().world_mut().remove_entities(&p.ids);
                self.events.emit(cx, &event::EntitiesDestroyed { ids: p.ids })?;
            }
            ServerPacket::EntityPosition(p) => {
                translate_entity(cx, p.entity_id, p.delta);
                self.events.emit(cx, &event::EntityMoved(p))?;
            }
            ServerPacket::EntityPositionAndRotation(p) => {
                translate_entity(cx, p.entity_id, p.delta);
                self.events.emit(cx, &event::EntityMovedAndLooked(p))?;
            }
            ServerPacket::EntityRotation(p) => self.events.emit(cx, &event::EntityLooked(p))?,
        }
        Ok(Flow::Continue)
    }

    fn join_game(&mut self, cx: &mut Context, packet: JoinGame) -> Result {
        let join = packet.join_info();
        log::info!(
            "Joined game: entity {}, {:?}{}, dimension {}, level type '{}'",
            join.entity_id,
            join.gamemode,
            if join.hardcore { " (hardcore)" } else { "" },
            join.dimension,
            join.level_type
        );
        cx.game_mut().player_mut().apply_join(join);
        self.events.emit(cx, &event::GameStarted)
    }

    fn disconnect(&mut self, cx: &mut Context, packet: Disconnect) -> Result<Flow> {
        log::info!("Disconnected by server: {}", packet.reason);
        self.events.emit(
            cx,
            &event::Disconnected {
                reason: packet.reason.clone(),
            },
        )?;
        Ok(Flow::Disconnect(packet.reason))
    }

    /// The server expects the teleport to be confirmed, then
    /// the resulting position to be sent back.
    fn position_and_look(&mut self, cx: &mut Context, packet: PlayerPositionAndLook) -> Result {
        let player = cx.game_mut().player_mut();
        player.apply_position_update(packet.pos, packet.yaw, packet.pitch, packet.flags);

        cx.send(&TeleportConfirm {
            teleport_id: packet.teleport_id,
        })?;
        cx.send_position()?;

        let player = cx.player();
        let event = event::PositionChanged {
            pos: player.position(),
            yaw: player.yaw,
            pitch: player.pitch,
        };
        self.events.emit(cx, &event)
    }

    fn abilities(&mut self, cx: &mut Context, packet: PlayerAbilities) -> Result {
        cx.game_mut().player_mut().abilities = Abilities {
            flags: packet.flags,
            flying_speed: packet.flying_speed,
            fov_modifier: packet.fov_modifier,
        };
        cx.send(self.settings)
    }

    /// On death, the server requires an absolute position before it
    /// accepts further movement.
    fn update_health(&mut self, cx: &mut Context, packet: UpdateHealth) -> Result {
        let died = cx
            .game_mut()
            .player_mut()
            .apply_health_update(packet.health, packet.food, packet.saturation);
        self.events.emit(
            cx,
            &event::HealthChanged {
                health: packet.health,
                food: packet.food,
                saturation: packet.saturation,
            },
        )?;

        if died {
            log::info!("Player died");
            cx.send_position()?;
            self.events.emit(cx, &event::Died)?;
        }
        Ok(())
    }

    fn set_experience(&mut self, cx: &mut Context, packet: SetExperience) -> Result {
        cx.game_mut()
            .player_mut()
            .apply_experience(packet.bar, packet.level, packet.total);
        self.events.emit(
            cx,
            &event::ExperienceChanged {
                bar: packet.bar,
                level: packet.level,
                total: packet.total,
            },
        )
    }

    fn held_item_change(&mut self, cx: &mut Context, packet: HeldItemChange) -> Result {
        if (0..=8).contains(&packet.slot) {
            cx.game_mut().player_mut().held_item = packet.slot as u8;
        } else {
            log::debug!("Ignoring held item change to slot {}", packet.slot);
        }
        self.events
            .emit(cx, &event::HeldItemChanged { slot: packet.slot })
    }

    fn sound_effect(&mut self, cx: &mut Context, packet: SoundEffect) -> Result {
        let name = cx.names().sound(packet.sound_id).map(str::to_owned);
        self.events.emit(
            cx,
            &event::SoundPlayed {
                name,
                sound_id: Some(packet.sound_id),
                category: packet.category,
                pos: packet.pos,
                volume: packet.volume,
                pitch: packet.pitch,
            },
        )
    }

    fn named_sound_effect(&mut self, cx: &mut Context, packet: NamedSoundEffect) -> Result {
        self.events.emit(
            cx,
            &event::SoundPlayed {
                name: Some(packet.name),
                sound_id: None,
                category: packet.category,
                pos: packet.pos,
                volume: packet.volume,
                pitch: packet.pitch,
            },
        )
    }

    /// A full chunk replaces whatever was loaded. A partial one
    /// only replaces the sections it carries.
    fn chunk_data(&mut self, cx: &mut Context, packet: ChunkData) -> Result {
        let chunk = self.decoder.decode(packet.section_mask, &packet.data)?;
        let world = cx.game_mut().world_mut();
        let existing = if packet.full_chunk {
            None
        } else {
            world.chunk_mut(packet.pos)
        };
        match existing {
            Some(existing) => existing.merge(chunk),
            None => world.load_chunk(packet.pos, chunk),
        }
        log::trace!(
            "Loaded chunk {:?} (mask {:#06x}, full: {})",
            packet.pos,
            packet.section_mask,
            packet.full_chunk
        );

        self.events.emit(
            cx,
            &event::ChunkLoaded {
                pos: packet.pos,
                full_chunk: packet.full_chunk,
            },
        )
    }

    fn window_items(&mut self, cx: &mut Context, packet: WindowItems) -> Result {
        if packet.window_id == 0 {
            cx.game_mut().set_inventory(&packet.slots);
        }
        self.events.emit(
            cx,
            &event::WindowItems {
                window_id: packet.window_id,
                slots: packet.slots,
            },
        )
    }

    /// Window -1 with slot -1 is the stack held by the cursor.
    fn set_slot(&mut self, cx: &mut Context, packet: SetSlot) -> Result {
        match (packet.window_id, packet.slot) {
            (-1, -1) => cx.game_mut().set_cursor(packet.item.clone()),
            (0, slot) => {
                if !cx.game_mut().set_inventory_slot(slot, packet.item.clone()) {
                    log::debug!("Ignoring update to inventory slot {}", slot);
                }
            }
            _ => {}
        }
        self.events.emit(
            cx,
            &event::SlotChanged {
                window_id: packet.window_id,
                slot: packet.slot,
                item: packet.item,
            },
        )
    }
}

fn translate_entity(cx: &mut Context, entity_id: i32, delta: [i16; 3]) {
    if let Some(entity) = cx.game_mut().world_mut().entity_mut(entity_id) {
        entity.translate(delta);
    }
}
