//! The handshake and offline-mode login.

use protocol::{
    packets::login::{Handshake, LoginPluginResponse, LoginStart, NEXT_STATE_LOGIN},
    LoginPacket, PROTOCOL_VERSION,
};
use uuid::Uuid;

use crate::{
    conn::{Connection, Transport},
    error::LoginError,
};

/// The identity the server assigned us.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub uuid: Uuid,
    pub username: String,
}

/// Performs the handshake and logs in without authentication.
///
/// On success the connection is in the play state. Servers in
/// online mode, and servers enabling compression, are rejected.
pub fn login<T: Transport>(
    conn: &mut Connection<T>,
    host: &str,
    port: u16,
    username: &str,
) -> Result<Profile, LoginError> {
    conn.send(&Handshake {
        protocol_version: PROTOCOL_VERSION,
        server_address: host.to_owned(),
        server_port: port,
        next_state: NEXT_STATE_LOGIN,
    })?;
    conn.send(&LoginStart {
        username: username.to_owned(),
    })?;

    loop {
        let raw = match conn.read_packet()? {
            Some(raw) => raw,
            None => continue,
        };
        let packet = LoginPacket::decode(&raw)?.ok_or(LoginError::UnexpectedPacket(raw.id))?;
        match packet {
            LoginPacket::Disconnect(reason) => return Err(LoginError::Rejected(reason)),
            LoginPacket::EncryptionRequest(_) => return Err(LoginError::EncryptionRequired),
            LoginPacket::SetCompression(threshold) => {
                return Err(LoginError::CompressionUnsupported(threshold))
            }
            LoginPacket::LoginPluginRequest {
                message_id,
                channel,
                ..
            } => {
                log::debug!("Declining login plugin request on '{}'", channel);
                conn.send(&LoginPluginResponse {
                    message_id,
                    data: None,
                })?;
            }
            LoginPacket::LoginSuccess { uuid, username } => {
                let uuid = Uuid::parse_str(&uuid).unwrap_or_else(|_| {
                    log::warn!("Server sent malformed UUID '{}'", uuid);
                    Uuid::nil()
                });
                log::info!("Logged in as {} ({})", username, uuid);
                return Ok(Profile { uuid, username });
            }
        }
    }
}
