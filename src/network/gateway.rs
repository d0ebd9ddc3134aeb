//! Gateway - TCP listener for IRC clients.
//!
//! The Gateway binds the listen socket and spawns a Connection task for each
//! accepted client.

use crate::config::{Config, LimitsConfig};
use crate::handlers::Registry;
use crate::network::Connection;
use crate::showdown::Connector;
use crate::state::ServerInfo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// Accepts client connections and hands each one its own task.
pub struct Gateway {
    listener: TcpListener,
    server: Arc<ServerInfo>,
    registry: Arc<Registry>,
    connector: Arc<dyn Connector>,
    limits: LimitsConfig,
}

impl Gateway {
    /// Bind the listen address from `config`.
    pub async fn bind(config: Config, connector: Arc<dyn Connector>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.listen.address).await?;
        info!(address = %config.listen.address, "Listening for IRC clients");

        Ok(Self {
            listener,
            server: Arc::new(ServerInfo::from_config(&config)),
            registry: Arc::new(Registry::new()),
            connector,
            limits: config.limits,
        })
    }

    /// The bound address, useful when the config asked for port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept clients forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Connection accepted");

                    let connection = Connection::new(
                        stream,
                        addr,
                        Arc::clone(&self.server),
                        Arc::clone(&self.registry),
                        Arc::clone(&self.connector),
                        &self.limits,
                    );
                    tokio::spawn(async move {
                        if let Err(e) = connection.run().await {
                            error!(%addr, error = %e, "Connection error");
                        }
                        info!(%addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
