//! showdown-ircd - IRC gateway for Pokémon Showdown chat.

use showdown_ircd::config::Config;
use showdown_ircd::network::Gateway;
use showdown_ircd::showdown::WebSocketConnector;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        network = %config.server.network,
        remote = %config.showdown.server_url,
        "Starting showdown-ircd"
    );

    let connector = Arc::new(WebSocketConnector::new(config.showdown.client_config()));
    let gateway = Gateway::bind(config, connector).await?;

    tokio::select! {
        result = gateway.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}
