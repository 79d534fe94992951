//! Handshake and login packets.

use derivative::Derivative;

use crate::{
    chat::ChatMessage,
    codec::{Decode, Encode, Reader, VarInt},
    error::Result,
    frame::RawPacket,
    ids::login as id,
    packets::Packet,
};

/// `next_state` value selecting the login state.
pub const NEXT_STATE_LOGIN: i32 = 2;

/// First packet on every connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: i32,
}

impl Encode for Handshake {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.protocol_version).encode(out);
        self.server_address.encode(out);
        self.server_port.encode(out);
        VarInt(self.next_state).encode(out);
    }
}

impl Packet for Handshake {
    const ID: i32 = id::HANDSHAKE;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginStart {
    pub username: String,
}

impl Encode for LoginStart {
    fn encode(&self, out: &mut Vec<u8>) {
        self.username.encode(out);
    }
}

impl Packet for LoginStart {
    const ID: i32 = id::LOGIN_START;
}

/// Answers a [`LoginPluginRequest`]. `data` is `None` when
/// the channel is not understood.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginPluginResponse {
    pub message_id: i32,
    pub data: Option<Vec<u8>>,
}

impl Encode for LoginPluginResponse {
    fn encode(&self, out: &mut Vec<u8>) {
        VarInt(self.message_id).encode(out);
        self.data.is_some().encode(out);
        if let Some(data) = &self.data {
            out.extend_from_slice(data);
        }
    }
}

impl Packet for LoginPluginResponse {
    const ID: i32 = id::LOGIN_PLUGIN_RESPONSE;
}

/// Packets the server sends during login.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub enum LoginPacket {
    Disconnect(ChatMessage),
    /// Online mode. Carries the server id.
    EncryptionRequest(String),
    LoginSuccess {
        uuid: String,
        username: String,
    },
    SetCompression(i32),
    LoginPluginRequest {
        message_id: i32,
        channel: String,
        #[derivative(Debug = "ignore")]
        data: Vec<u8>,
    },
}

impl LoginPacket {
    /// Returns `None` for ids not valid in this state.
    pub fn decode(raw: &RawPacket) -> Result<Option<Self>> {
        let reader = &mut Reader::new(&raw.body);
        let packet = match raw.id {
            id::DISCONNECT => LoginPacket::Disconnect(reader.read()?),
            id::ENCRYPTION_REQUEST => LoginPacket::EncryptionRequest(reader.read()?),
            id::LOGIN_SUCCESS => LoginPacket::LoginSuccess {
                uuid: reader.read()?,
                username: reader.read()?,
            },
            id::SET_COMPRESSION => LoginPacket::SetCompression(VarInt::decode(reader)?.0),
            id::LOGIN_PLUGIN_REQUEST => LoginPacket::LoginPluginRequest {
                message_id: VarInt::decode(reader)?.0,
                channel: reader.read()?,
                data: reader.rest().to_vec(),
            },
            _ => return Ok(None),
        };
        Ok(Some(packet))
    }
}
