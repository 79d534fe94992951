//! A headless client for protocol 578 servers.
//!
//! [`connect`] logs in and returns a [`Session`]. The session owns
//! the connection and the [`Game`] state, and is driven from one
//! thread with [`Session::run`] or [`Session::step`]. Other threads
//! reach it through a [`SessionHandle`]. Built-in packet handling
//! keeps the state current and sends the replies the server
//! requires; everything else is exposed as events on the
//! [`EventBus`].

use std::{io, net::TcpStream};

pub mod actions;
pub mod config;
pub mod conn;
pub mod decoder;
pub mod error;
pub mod event;
pub mod game;
mod handle;
pub mod login;
pub mod names;
pub mod session;
pub mod task;

#[cfg(test)]
mod test_util;

pub use self::{
    actions::Context,
    config::Config,
    conn::{Connection, Transport},
    error::{ActionError, HandleError, LoginError, SessionError},
    event::{EventBus, Intercept},
    game::Game,
    login::Profile,
    session::{Session, SessionState, Step},
    task::SessionHandle,
};

/// Connects to the configured server and logs in.
///
/// The returned session has not processed any play packets yet,
/// so handlers can be registered before the first step.
pub fn connect(config: &Config) -> Result<Session<TcpStream>, LoginError> {
    let (host, port) = config.host_and_port().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid server address '{}'", config.server),
        )
    })?;

    log::info!("Connecting to {}:{}", host, port);
    let stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(config.read_timeout())?;
    stream.set_nodelay(true)?;

    let mut conn = Connection::new(stream);
    let profile = login::login(&mut conn, host, port, &config.username)?;

    let session = Session::new(conn)?
        .with_display(&config.display)
        .with_receive_map(config.receive_map)
        .with_profile(profile);
    Ok(session)
}
