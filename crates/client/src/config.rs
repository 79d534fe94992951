//! Bot configuration, loaded from YAML.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::Context as _;
use log::LevelFilter;
use protocol::packets::client::ClientSettings;
use serde::Deserialize;

/// Default server port, used when the address has none.
pub const DEFAULT_PORT: u16 = 25565;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `host` or `host:port`.
    pub server: String,
    pub username: String,
    pub log_level: LevelFilter,
    /// When false, chunk and block change packets are dropped
    /// without being decoded.
    pub receive_map: bool,
    /// How long a read may block before the session checks its
    /// task queue again. Without a timeout, queued tasks wait
    /// for the next packet.
    pub read_timeout_ms: Option<u64>,
    /// Optional name table, see [`NameTable`](crate::names::NameTable).
    pub names: Option<PathBuf>,
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: format!("localhost:{}", DEFAULT_PORT),
            username: "bot".to_owned(),
            log_level: LevelFilter::Info,
            receive_map: true,
            read_timeout_ms: Some(100),
            names: None,
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("malformed config '{}'", path.display()))
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Splits [`server`](Self::server) into host and port.
    pub fn host_and_port(&self) -> Option<(&str, u16)> {
        match self.server.rsplit_once(':') {
            Some((host, port)) => Some((host, port.parse().ok()?)),
            None => Some((&self.server, DEFAULT_PORT)),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Enabled,
    CommandsOnly,
    Hidden,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainHand {
    Left,
    #[default]
    Right,
}

/// Client display preferences, announced to the server
/// whenever it sends the player abilities.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: String,
    pub view_distance: i8,
    pub chat_mode: ChatMode,
    pub chat_colors: bool,
    /// Bit mask of the skin layers to show. All seven by default.
    pub displayed_skin_parts: u8,
    pub main_hand: MainHand,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            locale: "en_us".to_owned(),
            view_distance: 15,
            chat_mode: ChatMode::Enabled,
            chat_colors: true,
            displayed_skin_parts: 0x7F,
            main_hand: MainHand::Right,
        }
    }
}

impl DisplaySettings {
    pub fn to_packet(&self) -> ClientSettings {
        ClientSettings {
            locale: self.locale.clone(),
            view_distance: self.view_distance,
            chat_mode: self.chat_mode as i32,
            chat_colors: self.chat_colors,
            displayed_skin_parts: self.displayed_skin_parts,
            main_hand: self.main_hand as i32,
        }
    }
}
