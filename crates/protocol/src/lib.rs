//! The client-server protocol. Defines the field encodings,
//! framing and all packets this client understands.
//!
//! # Protocol overview
//! The protocol consists of several _states_ representing the
//! status of the current connection.
//! * The [`Handshake`](State::Handshake) state is the initial state.
//! The client sends a single [`Handshake`](packets::login::Handshake)
//! selecting the next state.
//! * In the [`Login`](State::Login) state the client announces its
//! username and waits for
//! [`LoginSuccess`](packets::login::LoginPacket::LoginSuccess).
//! * The [`Play`](State::Play) state follows and lasts until either
//! peer disconnects.
//!
//! Every packet is a [frame](frame): a VarInt length, a VarInt
//! packet id and the fields. Compression and encryption are
//! not supported.
//!
//! The initial stream of packets looks like this:
//! * Client sends `Handshake` and `LoginStart`.
//! * Server sends `LoginSuccess`. State switches to `Play`.
//! * Server sends [`JoinGame`](packets::server::JoinGame), then local
//! chunks, entities, etc. and continues sending these as the
//! client moves.
//! * Server sends periodic [`KeepAlive`](packets::server::KeepAlive)s
//! which the client must echo.

/// Protocol revision spoken by this crate (release 1.15.2).
pub const PROTOCOL_VERSION: i32 = 578;

pub mod chat;
pub mod chunk;
pub mod codec;
pub mod error;
pub mod frame;
pub mod ids;
pub mod nbt;
pub mod packets;
pub mod slot;

#[doc(inline)]
pub use self::{
    chat::ChatMessage,
    codec::{Decode, Encode, Reader},
    error::{CodecError, Result},
    frame::{FrameReader, RawPacket},
    packets::{LoginPacket, Packet, ServerPacket},
    slot::Slot,
};

/// A state in the protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Handshake,
    Login,
    Play,
}
