//! All packets. Packets are defined in the submodule
//! corresponding to the peer which sends them; handshake
//! and login packets live in `login`.

use crate::codec::{encode_to_vec, Encode};

pub mod client;
pub mod login;
pub mod server;

#[doc(inline)]
pub use self::{login::LoginPacket, server::ServerPacket};

/// A packet this client can send.
pub trait Packet: Encode {
    /// The packet id written before the fields.
    const ID: i32;

    /// Encodes the packet fields (without the id).
    fn body(&self) -> Vec<u8> {
        encode_to_vec(self)
    }
}
