//! Configuration loading and management.

mod defaults;
mod validation;

pub use validation::{ValidationError, validate};

use defaults::*;
use serde::Deserialize;
use showdown_proto::ClientConfig;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ValidationError>),
}

/// Gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Identity presented to IRC clients.
    pub server: ServerConfig,
    /// Where IRC clients connect.
    pub listen: ListenConfig,
    /// The chat service to relay to.
    #[serde(default)]
    pub showdown: ShowdownConfig,
    /// Connection limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the prefix of numerics and in PONG.
    pub name: String,
    /// Network name shown in the welcome message.
    #[serde(default = "default_network")]
    pub network: String,
    /// Message of the day, one entry per line.
    #[serde(default)]
    pub motd: Vec<String>,
}

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "127.0.0.1:6667").
    pub address: SocketAddr,
}

/// Remote chat service endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowdownConfig {
    /// WebSocket URL of the chat server.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Login server endpoint (`action.php`).
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for ShowdownConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            login_url: default_login_url(),
        }
    }
}

impl ShowdownConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url.clone(),
            login_url: self.login_url.clone(),
        }
    }
}

/// Per-connection limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Seconds a client may take to finish NICK/USER before being dropped.
    #[serde(default = "default_registration_timeout")]
    pub registration_timeout: u64,
    /// Outgoing lines buffered per client before writers wait.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            registration_timeout: default_registration_timeout(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

impl LimitsConfig {
    pub fn registration_timeout(&self) -> Duration {
        Duration::from_secs(self.registration_timeout)
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}
