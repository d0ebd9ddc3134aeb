//! Error types for the Showdown session client.

use thiserror::Error;

/// Errors raised while setting up or running a session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid server url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
