//! Events raised by the session after it applies a packet,
//! and the [`EventBus`] that delivers them.

use std::any::{Any, TypeId};

use ahash::AHashMap;
use common::ChunkPos;
use protocol::{
    packets::server::{
        EntityPosition, EntityPositionAndRotation, EntityRotation, SpawnMob, SpawnObject,
        SpawnPlayer,
    },
    ChatMessage, RawPacket, Slot,
};

use crate::{actions::Context, error::SessionError};

/// The join packet has been applied. Raised once per session.
#[derive(Copy, Clone, Debug)]
pub struct GameStarted;

/// A chat message. `position` is 0 for player chat,
/// 1 for system messages and 2 for the action bar.
#[derive(Clone, Debug)]
pub struct ChatReceived {
    pub message: ChatMessage,
    pub position: i8,
}

/// The server closed the session.
#[derive(Clone, Debug)]
pub struct Disconnected {
    pub reason: ChatMessage,
}

#[derive(Copy, Clone, Debug)]
pub struct HealthChanged {
    pub health: f32,
    pub food: i32,
    pub saturation: f32,
}

#[derive(Copy, Clone, Debug)]
pub struct ExperienceChanged {
    pub bar: f32,
    pub level: i32,
    pub total: i32,
}

/// The player died. Raised once per death, after the
/// position has been re-sent to the server.
#[derive(Copy, Clone, Debug)]
pub struct Died;

/// A sound played nearby. Sounds sent by id carry a name
/// only if the configured name lookup knows it.
#[derive(Clone, Debug)]
pub struct SoundPlayed {
    pub name: Option<String>,
    pub sound_id: Option<i32>,
    pub category: i32,
    pub pos: [f64; 3],
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Clone, Debug)]
pub struct PluginMessage {
    pub channel: String,
    pub data: Vec<u8>,
}

/// The server selected a hotbar slot.
#[derive(Copy, Clone, Debug)]
pub struct HeldItemChanged {
    pub slot: i8,
}

/// The full contents of a window.
#[derive(Clone, Debug)]
pub struct WindowItems {
    pub window_id: u8,
    pub slots: Vec<Slot>,
}

#[derive(Clone, Debug)]
pub struct SlotChanged {
    pub window_id: i8,
    pub slot: i16,
    pub item: Slot,
}

#[derive(Copy, Clone, Debug)]
pub struct WindowClosed {
    pub window_id: u8,
}

#[derive(Clone, Debug)]
pub struct ObjectSpawned(pub SpawnObject);

#[derive(Clone, Debug)]
pub struct MobSpawned(pub SpawnMob);

#[derive(Clone, Debug)]
pub struct PlayerSpawned(pub SpawnPlayer);

#[derive(Clone, Debug)]
pub struct EntitiesDestroyed {
    pub ids: Vec<i32>,
}

#[derive(Clone, Debug)]
pub struct EntityMoved(pub EntityPosition);

#[derive(Clone, Debug)]
pub struct EntityMovedAndLooked(pub EntityPositionAndRotation);

#[derive(Clone, Debug)]
pub struct EntityLooked(pub EntityRotation);

/// A chunk has been loaded.
#[derive(Copy, Clone, Debug)]
pub struct ChunkLoaded {
    pub pos: ChunkPos,
    pub full_chunk: bool,
}

/// The server moved the player.
#[derive(Copy, Clone, Debug)]
pub struct PositionChanged {
    pub pos: [f64; 3],
    pub yaw: f32,
    pub pitch: f32,
}

/// Returned by the packet interceptor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intercept {
    /// The packet was consumed. Built-in handling is skipped.
    Handled,
    /// Continue with built-in handling.
    Pass,
}

type Handler<E> = Box<dyn FnMut(&mut Context, &E) -> anyhow::Result<()>>;
type Interceptor = Box<dyn FnMut(&mut Context, &RawPacket) -> anyhow::Result<Intercept>>;

/// An _event bus_ for registering handlers and delivering events.
///
/// Events can be of any `'static` type. Handlers for an event type
/// run in registration order as soon as the event is emitted; events
/// without handlers are dropped.
///
/// A single _interceptor_ may also be installed. It observes every
/// packet before the session handles it and can claim the packet.
#[derive(Default)]
pub struct EventBus {
    handlers: AHashMap<TypeId, Box<dyn Any>>,
    interceptor: Option<Interceptor>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for events of type `E`.
    pub fn on<E>(
        &mut self,
        handler: impl FnMut(&mut Context, &E) -> anyhow::Result<()> + 'static,
    ) -> &mut Self
    where
        E: 'static,
    {
        self.handlers_mut::<E>().push(Box::new(handler));
        self
    }

    /// Installs the packet interceptor, replacing any previous one.
    pub fn intercept(
        &mut self,
        interceptor: impl FnMut(&mut Context, &RawPacket) -> anyhow::Result<Intercept> + 'static,
    ) -> &mut Self {
        self.interceptor = Some(Box::new(interceptor));
        self
    }

    /// Returns whether any handler is registered for `E`.
    pub fn has_handlers<E>(&self) -> bool
    where
        E: 'static,
    {
        self.handlers.contains_key(&TypeId::of::<E>())
    }

    /// Delivers `event` to each handler for its type. Stops at
    /// the first handler that fails.
    pub(crate) fn emit<E>(&mut self, cx: &mut Context, event: &E) -> Result<(), SessionError>
    where
        E: 'static,
    {
        let handlers = match self.handlers.get_mut(&TypeId::of::<E>()) {
            Some(handlers) => handlers
                .downcast_mut::<Vec<Handler<E>>>()
                .expect("mismatched types"),
            None => return Ok(()),
        };
        for handler in handlers {
            handler(&mut *cx, event).map_err(SessionError::from_handler)?;
        }
        Ok(())
    }

    /// Offers a packet to the interceptor.
    pub(crate) fn offer(&mut self, cx: &mut Context, packet: &RawPacket) -> Result<Intercept, SessionError> {
        match &mut self.interceptor {
            Some(interceptor) => interceptor(cx, packet).map_err(SessionError::from_handler),
            None => Ok(Intercept::Pass),
        }
    }

    fn handlers_mut<E>(&mut self) -> &mut Vec<Handler<E>>
    where
        E: 'static,
    {
        self.handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<Handler<E>>::new()))
            .downcast_mut()
            .expect("mismatched types")
    }
}
