//! Per-connection state and server identity.
//!
//! - [`machine`]: the registration state machine
//! - [`session`]: everything one client connection owns

mod machine;
mod session;

pub use machine::{Half, Registration, Transition};
pub use session::{LoginData, Session, SharedNick};

use crate::config::Config;

/// Identity the gateway presents to clients.
///
/// Built once from the config and passed to every handler; handlers never
/// read the server name from anywhere else.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub network: String,
    pub version: String,
    pub created: String,
    pub motd: Vec<String>,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            network: config.server.network.clone(),
            version: format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            created: chrono::Utc::now().format("%a %b %e %Y at %H:%M:%S UTC").to_string(),
            motd: config.server.motd.clone(),
        }
    }
}
