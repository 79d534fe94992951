//! The session engine: a single-threaded loop that owns the
//! connection and the game state.

use std::{io, mem};

use flume::Receiver;
use protocol::{
    ids::clientbound as id, packets::client::ClientSettings, ChatMessage, RawPacket, ServerPacket,
};

use crate::{
    actions::Context,
    config::DisplaySettings,
    conn::{Connection, Transport},
    decoder::{ChunkDecoder, PalettedChunkDecoder},
    error::SessionError,
    event::{EventBus, Intercept},
    game::Game,
    handle::{Dispatch, Flow},
    login::Profile,
    names::{NameLookup, NoNames},
    task::{self, SessionHandle, SessionThreadGuard, Task},
};

/// Lifecycle of a session. Both non-running states are final.
#[derive(Debug)]
pub enum SessionState {
    Running,
    /// The server sent a disconnect with this reason.
    Disconnected(ChatMessage),
    Failed(SessionError),
}

/// What a call to [`Session::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Ran one queued task.
    Task,
    /// Handled the packet with this id.
    Packet(i32),
    /// The read timed out with no complete packet.
    Idle,
    /// The session is over. See [`Session::state`].
    Finished,
}

/// A play-state session with a server.
///
/// The session is driven by one thread, which runs tasks queued
/// through a [`SessionHandle`] and handles incoming packets in
/// turn. A queued task always runs before the next packet is read.
pub struct Session<T> {
    conn: Connection<T>,
    game: Game,
    events: EventBus,
    tasks: Option<Receiver<Task>>,
    handle: SessionHandle,

    decoder: Box<dyn ChunkDecoder>,
    names: Box<dyn NameLookup>,
    settings: ClientSettings,
    receive_map: bool,
    profile: Option<Profile>,

    state: SessionState,
}

impl<T> Session<T>
where
    T: Transport,
{
    /// Creates a session over a connection that has
    /// completed login.
    pub fn new(conn: Connection<T>) -> io::Result<Self> {
        let (sender, receiver) = task::queue();
        let handle = SessionHandle::new(sender, conn.closer()?);
        Ok(Self {
            conn,
            game: Game::new(),
            events: EventBus::new(),
            tasks: Some(receiver),
            handle,
            decoder: Box::new(PalettedChunkDecoder),
            names: Box::new(NoNames),
            settings: DisplaySettings::default().to_packet(),
            receive_map: true,
            profile: None,
            state: SessionState::Running,
        })
    }

    pub fn with_chunk_decoder(mut self, decoder: impl ChunkDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    pub fn with_names(mut self, names: impl NameLookup + 'static) -> Self {
        self.names = Box::new(names);
        self
    }

    /// Sets the client settings sent whenever the server
    /// updates the player's abilities.
    pub fn with_display(mut self, display: &DisplaySettings) -> Self {
        self.settings = display.to_packet();
        self
    }

    /// When disabled, chunk and block change packets are dropped
    /// unread and the world stays empty.
    pub fn with_receive_map(mut self, receive_map: bool) -> Self {
        self.receive_map = receive_map;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// The profile from login, if this session was created by
    /// [`connect`](crate::connect).
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running)
    }

    /// Runs one task, or reads and handles one packet.
    ///
    /// Errors end the session and are kept in its state.
    pub fn step(&mut self) -> Step {
        if !self.is_running() {
            return Step::Finished;
        }

        let _guard = SessionThreadGuard::enter();
        let step = match self.try_step() {
            Ok(step) => step,
            Err(err) => {
                log::debug!("Session failed: {}", err);
                self.state = SessionState::Failed(err);
                Step::Finished
            }
        };

        if self.is_running() {
            step
        } else {
            // Pending tasks are dropped, so blocked callers wake up.
            self.tasks = None;
            Step::Finished
        }
    }

    /// Steps until the session ends. Returns the server's reason
    /// on a clean disconnect.
    pub fn run(mut self) -> Result<ChatMessage, SessionError> {
        loop {
            self.step();
            match mem::replace(&mut self.state, SessionState::Running) {
                SessionState::Running => {}
                SessionState::Disconnected(reason) => return Ok(reason),
                SessionState::Failed(err) => return Err(err),
            }
        }
    }

    fn try_step(&mut self) -> Result<Step, SessionError> {
        let task = self.tasks.as_ref().and_then(|tasks| tasks.try_recv().ok());
        if let Some(task) = task {
            let mut cx = Context::new(&mut self.conn, &mut self.game, &*self.names);
            task(&mut cx).map_err(SessionError::from_task)?;
            return Ok(Step::Task);
        }

        match self.conn.read_packet()? {
            Some(packet) => {
                let id = packet.id;
                self.dispatch(packet).map_err(|err| err.in_packet(id))?;
                Ok(Step::Packet(id))
            }
            None => Ok(Step::Idle),
        }
    }

    fn dispatch(&mut self, raw: RawPacket) -> Result<(), SessionError> {
        let mut cx = Context::new(&mut self.conn, &mut self.game, &*self.names);
        if self.events.offer(&mut cx, &raw)? == Intercept::Handled {
            return Ok(());
        }
        if !self.receive_map && is_map_packet(raw.id) {
            return Ok(());
        }

        let packet = match ServerPacket::decode(&raw)? {
            Some(packet) => packet,
            None => {
                log::trace!("Ignoring unknown packet {:#04x}", raw.id);
                return Ok(());
            }
        };

        let mut dispatch = Dispatch {
            events: &mut self.events,
            decoder: &*self.decoder,
            settings: &self.settings,
        };
        if let Flow::Disconnect(reason) = dispatch.handle(&mut cx, packet)? {
            self.state = SessionState::Disconnected(reason);
        }
        Ok(())
    }
}

fn is_map_packet(packet_id: i32) -> bool {
    matches!(
        packet_id,
        id::CHUNK_DATA | id::BLOCK_CHANGE | id::MULTI_BLOCK_CHANGE
    )
}
