//! WebSocket session client.
//!
//! [`Client::connect`] returns immediately. A spawned task opens the socket,
//! drains the outbox, answers `challstr` with a login and forwards parsed
//! frames. Sends never block: commands queued before the socket is open are
//! flushed once it is.
//!
//! ```text
//!   Client / Room ──► outbox (unbounded) ──► socket task ──► server
//!                                               │
//!   events (mpsc) ◄──── Frame / Disconnected ◄──┘
//! ```

use crate::command;
use crate::error::Error;
use crate::frame::{Event, Frame};
use crate::id::RoomId;
use crate::login::LoginServer;
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Capacity of the inbound event queue per session.
const EVENT_QUEUE: usize = 256;

/// Where to connect.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// WebSocket URL of the chat server (`ws://` or `wss://`).
    pub server_url: String,
    /// URL of the login server's `action.php`.
    pub login_url: String,
}

/// Who to log in as.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub password: Option<String>,
}

/// Notifications from the socket task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// The socket is open.
    Connected,
    /// A frame from the server.
    Frame(Frame),
    /// Taking the configured name failed; the session stays up as a guest.
    LoginFailed(String),
    /// The socket closed. Carries the close reason or error, if any.
    Disconnected(Option<String>),
}

/// Fire-and-forget handle on the socket task's send queue.
#[derive(Clone, Debug)]
struct Outbox(mpsc::UnboundedSender<String>);

impl Outbox {
    fn push(&self, line: String) {
        if self.0.send(line).is_err() {
            debug!("Session closed, dropping outgoing command");
        }
    }
}

/// A room on the server. Cheap to clone; all clones share the session.
#[derive(Clone, Debug)]
pub struct Room {
    id: RoomId,
    outbox: Outbox,
}

impl Room {
    /// Run `/kind payload` in this room.
    pub fn send_command(&self, kind: &str, payload: &str) {
        self.push(command::room_command(&self.id, kind, payload));
    }

    /// Say `message` in this room.
    pub fn reply(&self, message: &str) {
        self.push(command::room_reply(&self.id, message));
    }

    fn push(&self, line: String) {
        if self.id.is_valid() {
            self.outbox.push(line);
        } else {
            warn!(room = %self.id, "Dropping command for malformed room id");
        }
    }
}

/// A session on the chat server.
///
/// Dropping the client (or calling [`Client::close`]) stops the socket task.
#[derive(Debug)]
pub struct Client {
    outbox: Outbox,
    rooms: DashMap<RoomId, Room>,
    cancel: CancellationToken,
}

impl Client {
    /// Start a session. Must be called from within a tokio runtime.
    pub fn connect(
        config: ClientConfig,
        credentials: Credentials,
    ) -> Result<(Client, mpsc::Receiver<ClientEvent>), Error> {
        check_url(&config.server_url)?;

        let (outbox_tx, outbox_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE);
        let outbox = Outbox(outbox_tx);
        let cancel = CancellationToken::new();

        let task = SocketTask {
            config,
            credentials,
            outbox: outbox.clone(),
            events: events_tx,
        };
        tokio::spawn(task.run(outbox_rx, cancel.clone()));

        Ok((
            Client {
                outbox,
                rooms: DashMap::new(),
                cancel,
            },
            events_rx,
        ))
    }

    /// Run a command outside any room, e.g. `/join` or `/pm`.
    pub fn send_global_command(&self, kind: &str, payload: &str) {
        self.outbox.push(command::global_command(kind, payload));
    }

    /// Handle for `id`; created on first use.
    pub fn room(&self, id: RoomId) -> Room {
        let outbox = &self.outbox;
        self.rooms
            .entry(id.clone())
            .or_insert_with(|| Room {
                id,
                outbox: outbox.clone(),
            })
            .clone()
    }

    /// Stop the socket task.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn check_url(url: &str) -> Result<(), Error> {
    let uri = url.parse::<Uri>().map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: format!("{e}"),
    })?;
    match uri.scheme_str() {
        Some("ws" | "wss") => Ok(()),
        other => Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", other.unwrap_or("")),
        }),
    }
}

struct SocketTask {
    config: ClientConfig,
    credentials: Credentials,
    outbox: Outbox,
    events: mpsc::Sender<ClientEvent>,
}

impl SocketTask {
    async fn run(self, outbox_rx: mpsc::UnboundedReceiver<String>, cancel: CancellationToken) {
        let reason = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Session closed locally");
                return;
            }
            result = self.session(outbox_rx) => match result {
                Ok(reason) => reason,
                Err(e) => {
                    warn!(error = %e, "Session failed");
                    Some(e.to_string())
                }
            },
        };
        info!(reason = ?reason, "Disconnected from chat server");
        let _ = self.events.send(ClientEvent::Disconnected(reason)).await;
    }

    async fn session(
        &self,
        mut outbox_rx: mpsc::UnboundedReceiver<String>,
    ) -> Result<Option<String>, Error> {
        let (socket, _) = connect_async(self.config.server_url.as_str()).await?;
        info!(url = %self.config.server_url, "Connected to chat server");
        let (mut write, mut read) = socket.split();
        let login = LoginServer::new(&self.config.login_url);

        if self.events.send(ClientEvent::Connected).await.is_err() {
            return Ok(None);
        }

        loop {
            tokio::select! {
                line = outbox_rx.recv() => {
                    let Some(line) = line else { return Ok(None) };
                    debug!(line = %line, "Sending");
                    write.send(WsMessage::Text(line)).await?;
                }
                frame = read.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        let frame = Frame::parse(&text);
                        for event in &frame.events {
                            if let Event::Challstr(challstr) = event {
                                self.spawn_login(login.clone(), challstr.clone());
                            }
                        }
                        if self.events.send(ClientEvent::Frame(frame)).await.is_err() {
                            return Ok(None);
                        }
                    }
                    Some(Ok(WsMessage::Close(close))) => {
                        return Ok(close.map(|c| c.reason.to_string()));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(None),
                },
            }
        }
    }

    fn spawn_login(&self, login: LoginServer, challstr: String) {
        let name = self.credentials.name.clone();
        if crate::id::to_id(&name).is_empty() {
            debug!("No name configured, staying a guest");
            return;
        }
        let password = self.credentials.password.clone();
        let outbox = self.outbox.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            match login.assertion(&name, password.as_deref(), &challstr).await {
                Ok(assertion) => {
                    info!(name = %name, "Obtained login assertion");
                    outbox.push(command::global_command(
                        "trn",
                        &format!("{name},0,{assertion}"),
                    ));
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "Login failed");
                    let _ = events.send(ClientEvent::LoginFailed(e.to_string())).await;
                }
            }
        });
    }
}
