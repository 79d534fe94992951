use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
};

use anyhow::Context as _;
use clap::Parser;
use client::{
    event::{ChatReceived, Died, GameStarted},
    names::NameTable,
    Config, SessionHandle,
};
use simple_logger::SimpleLogger;

#[derive(Parser, Debug)]
#[command(name = "bot", version, about = "Headless client for protocol 578 servers")]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Server address, overriding the config.
    #[arg(long)]
    server: Option<String>,
    /// Username, overriding the config.
    #[arg(long)]
    username: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(server) = cli.server {
        config.server = server;
    }
    if let Some(username) = cli.username {
        config.username = username;
    }

    SimpleLogger::new().with_level(config.log_level).init()?;

    let mut session = client::connect(&config)
        .with_context(|| format!("failed to join '{}'", config.server))?;
    if let Some(path) = &config.names {
        session = session.with_names(NameTable::load(path)?);
    }

    session
        .events_mut()
        .on(|cx, _: &GameStarted| {
            log::info!("Spawned as entity {}", cx.player().entity_id);
            Ok(())
        })
        .on(|_, event: &ChatReceived| {
            log::info!("[chat] {}", event.message.plain_text());
            Ok(())
        })
        .on(|cx, _: &Died| {
            log::info!("Died at {:?}, respawning", cx.player().block_pos());
            cx.respawn()?;
            Ok(())
        });

    forward_stdin(session.handle());

    match session.run() {
        Ok(reason) => {
            log::info!("Disconnected: {}", reason.plain_text());
            Ok(())
        }
        Err(err) => {
            log::error!("Session failed: {}", err);
            Err(err.into())
        }
    }
}

/// Sends each line typed on stdin as a chat message.
fn forward_stdin(handle: SessionHandle) {
    let spawned = thread::Builder::new()
        .name("stdin".to_owned())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                match handle.call(move |cx| cx.chat(&line)) {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => log::warn!("Could not send chat: {}", err),
                    Err(_) => break,
                }
            }
        });
    if let Err(err) = spawned {
        log::warn!("Chat input disabled: {}", err);
    }
}
