//! The connection to the server: framing over a byte transport.

use std::{
    io::{self, Read, Write},
    net::{Shutdown, TcpStream},
    sync::Arc,
};

use protocol::{
    frame::{write_frame, FrameReader},
    Packet, RawPacket,
};

use crate::error::SessionError;

/// Shuts a transport down from another thread. Any read
/// blocked on the transport must then fail or return end
/// of stream.
pub trait Closer: Send + Sync {
    fn close(&self) -> io::Result<()>;
}

/// A bidirectional byte stream to the server.
pub trait Transport: Read + Write {
    /// Returns a handle that can close this transport
    /// from any thread.
    fn closer(&self) -> io::Result<Arc<dyn Closer>>;
}

impl Closer for TcpStream {
    fn close(&self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

impl Transport for TcpStream {
    fn closer(&self) -> io::Result<Arc<dyn Closer>> {
        Ok(Arc::new(self.try_clone()?))
    }
}

/// Sink for outbound packets.
pub trait PacketWrite {
    /// Writes a packet whose fields are already encoded.
    fn write_raw(&mut self, id: i32, body: &[u8]) -> Result<(), SessionError>;
}

/// Reads and writes framed packets.
///
/// The connection is owned by the session thread; other
/// threads may only close the transport through its [`Closer`].
pub struct Connection<T> {
    transport: T,
    frames: FrameReader,
    out: Vec<u8>,
}

impl<T> Connection<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            frames: FrameReader::new(),
            out: Vec::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn closer(&self) -> io::Result<Arc<dyn Closer>> {
        self.transport.closer()
    }

    /// Reads the next complete packet.
    ///
    /// Returns `None` if the transport timed out before a full
    /// packet arrived. Bytes received so far stay buffered, so
    /// the next call resumes where this one stopped.
    pub fn read_packet(&mut self) -> Result<Option<RawPacket>, SessionError> {
        loop {
            if let Some(packet) = self.frames.next_frame()? {
                log::trace!("Received packet {:#04x} ({} bytes)", packet.id, packet.body.len());
                return Ok(Some(packet));
            }

            match self.frames.fill(&mut self.transport) {
                Ok(0) => return Err(SessionError::TransportClosed),
                Ok(_) => {}
                Err(e) if is_timeout(&e) => return Ok(None),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SessionError::TransportIo(e)),
            }
        }
    }

    /// Encodes and writes a packet.
    pub fn send<P: Packet>(&mut self, packet: &P) -> Result<(), SessionError> {
        self.write_raw(P::ID, &packet.body())
    }
}

impl<T> PacketWrite for Connection<T>
where
    T: Transport,
{
    fn write_raw(&mut self, id: i32, body: &[u8]) -> Result<(), SessionError> {
        self.out.clear();
        write_frame(id, body, &mut self.out);
        self.transport.write_all(&self.out)?;
        self.transport.flush()?;
        log::trace!("Sent packet {:#04x} ({} bytes)", id, body.len());
        Ok(())
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
