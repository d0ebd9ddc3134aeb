//! Remote session facade.
//!
//! Handlers talk to the chat service only through these traits. Every call
//! is a fire-and-forget send: nothing here waits on the network, and the
//! same room may be driven concurrently by other connections.

#[cfg(test)]
pub(crate) mod testing;

use showdown_proto::{Client, ClientConfig, ClientEvent, Credentials, Room, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A room on the remote service.
pub trait ShowdownRoom: Send + Sync {
    /// Run `/kind payload` in the room.
    fn send_command(&self, kind: &str, payload: &str);
    /// Say `message` in the room.
    fn reply(&self, message: &str);
}

/// One logged-in session on the remote service.
pub trait ShowdownSession: Send + Sync {
    /// Run a command outside any room (`join`, `pm`, ...).
    fn send_global_command(&self, kind: &str, payload: &str);
    /// Handle for a room, joined or not.
    fn room(&self, id: RoomId) -> Box<dyn ShowdownRoom>;
    /// End the session.
    fn close(&self);
}

/// A freshly opened session and the stream of events it produces.
pub struct Connected {
    pub session: Arc<dyn ShowdownSession>,
    pub events: mpsc::Receiver<ClientEvent>,
}

/// Opens remote sessions when a client finishes registering.
pub trait Connector: Send + Sync {
    fn connect(&self, credentials: Credentials) -> Result<Connected, showdown_proto::Error>;
}

impl ShowdownRoom for Room {
    fn send_command(&self, kind: &str, payload: &str) {
        Room::send_command(self, kind, payload);
    }

    fn reply(&self, message: &str) {
        Room::reply(self, message);
    }
}

impl ShowdownSession for Client {
    fn send_global_command(&self, kind: &str, payload: &str) {
        Client::send_global_command(self, kind, payload);
    }

    fn room(&self, id: RoomId) -> Box<dyn ShowdownRoom> {
        Box::new(Client::room(self, id))
    }

    fn close(&self) {
        Client::close(self);
    }
}

/// Connects to a real server over WebSocket.
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    config: ClientConfig,
}

impl WebSocketConnector {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Connector for WebSocketConnector {
    fn connect(&self, credentials: Credentials) -> Result<Connected, showdown_proto::Error> {
        let (client, events) = Client::connect(self.config.clone(), credentials)?;
        Ok(Connected {
            session: Arc::new(client),
            events,
        })
    }
}
