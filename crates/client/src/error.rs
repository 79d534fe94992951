use std::io;

use protocol::{ChatMessage, CodecError};

/// A fatal error that ends a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("connection closed")]
    TransportClosed,
    #[error("transport error: {0}")]
    TransportIo(#[from] io::Error),
    #[error("event handler failed: {0:#}")]
    HandlerRejected(#[source] anyhow::Error),
    #[error("task failed: {0:#}")]
    TaskFailed(#[source] anyhow::Error),
    #[error("failed to handle packet {id:#04x}: {source}")]
    InPacket {
        id: i32,
        #[source]
        source: Box<SessionError>,
    },
}

impl SessionError {
    /// Returns the id of the packet being processed when
    /// the error occurred, if any.
    pub fn packet_id(&self) -> Option<i32> {
        match self {
            SessionError::InPacket { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Returns the underlying error without packet context.
    pub fn kind(&self) -> &SessionError {
        match self {
            SessionError::InPacket { source, .. } => source.kind(),
            other => other,
        }
    }

    pub(crate) fn in_packet(self, id: i32) -> Self {
        match self {
            SessionError::InPacket { .. } => self,
            source => SessionError::InPacket {
                id,
                source: Box::new(source),
            },
        }
    }

    /// Converts an error returned from a callback. Errors the engine
    /// itself raised inside the callback (a failed write, say) keep
    /// their kind.
    pub(crate) fn from_handler(err: anyhow::Error) -> Self {
        engine_error(err).unwrap_or_else(SessionError::HandlerRejected)
    }

    pub(crate) fn from_task(err: anyhow::Error) -> Self {
        engine_error(err).unwrap_or_else(SessionError::TaskFailed)
    }
}

fn engine_error(err: anyhow::Error) -> Result<SessionError, anyhow::Error> {
    let err = match err.downcast::<SessionError>() {
        Ok(err) => return Ok(err),
        Err(err) => err,
    };
    match err.downcast::<ActionError>() {
        Ok(ActionError::Session(err)) => Ok(err),
        Ok(other) => Err(other.into()),
        Err(err) => Err(err),
    }
}

/// An error during the login phase.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("connection closed during login")]
    Closed,
    #[error("server rejected login: {0}")]
    Rejected(ChatMessage),
    #[error("server requires online mode, which is not supported")]
    EncryptionRequired,
    #[error("server enabled compression (threshold {0}), which is not supported")]
    CompressionUnsupported(i32),
    #[error("unexpected packet {0:#04x} during login")]
    UnexpectedPacket(i32),
}

impl From<SessionError> for LoginError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Codec(err) => LoginError::Codec(err),
            SessionError::TransportClosed => LoginError::Closed,
            SessionError::TransportIo(err) => LoginError::Io(err),
            other => LoginError::Io(io::Error::new(io::ErrorKind::Other, other)),
        }
    }
}

/// An error returned by [`SessionHandle`](crate::SessionHandle).
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    #[error("session has ended")]
    SessionClosed,
    #[error("blocking call issued from the session thread")]
    Reentrant,
}

/// An outbound action that was refused before anything was sent.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("chat message is {0} bytes long, the limit is 256")]
    MessageTooLong(usize),
    #[error("hotbar slot {0} is out of range 0..=8")]
    InvalidHotbarSlot(i32),
    #[error(transparent)]
    Session(#[from] SessionError),
}
