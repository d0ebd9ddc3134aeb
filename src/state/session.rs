//! State owned by one client connection.

use super::machine::Registration;
use crate::showdown::{Connected, ShowdownSession};
use parking_lot::RwLock;
use showdown_proto::{ClientEvent, Credentials};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Credentials collected before registration completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginData {
    /// From PASS.
    pub password: Option<String>,
    /// Remote identity, verbatim from USER's realname field.
    pub nickname: String,
}

impl LoginData {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            name: self.nickname.clone(),
            password: self.password.clone(),
        }
    }
}

/// The client's IRC nick.
///
/// Shared by the command loop and the relay task: a rename pushed by the
/// remote side is stored before the NICK line is queued, so every reply
/// built after the client sees the NICK addresses the new nick.
#[derive(Debug, Clone, Default)]
pub struct SharedNick(Arc<RwLock<String>>);

impl SharedNick {
    pub fn get(&self) -> String {
        self.0.read().clone()
    }

    pub fn set(&self, nick: impl Into<String>) {
        *self.0.write() = nick.into();
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl fmt::Display for SharedNick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.read())
    }
}

/// Per-connection session state.
#[derive(Default)]
pub struct Session {
    pub registration: Registration,
    pub login: LoginData,
    /// IRC-safe form of `login.nickname`, used as our own nick on the wire.
    pub nickname: SharedNick,
    /// Nick the client asked for with NICK, if any.
    pub requested_nick: Option<String>,
    showdown: Option<Arc<dyn ShowdownSession>>,
    events: Option<mpsc::Receiver<ClientEvent>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The nick to address this client by in replies.
    pub fn client_nick(&self) -> String {
        if !self.nickname.is_empty() {
            self.nickname.get()
        } else {
            self.requested_nick.as_deref().unwrap_or("*").to_string()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.registration.is_closed()
    }

    /// The remote session, once registration has completed.
    pub fn showdown(&self) -> Option<&Arc<dyn ShowdownSession>> {
        self.showdown.as_ref()
    }

    /// Store a newly opened remote session.
    pub fn attach(&mut self, connected: Connected) {
        self.showdown = Some(connected.session);
        self.events = Some(connected.events);
    }

    /// Take the remote event stream so it can be relayed.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<ClientEvent>> {
        self.events.take()
    }

    /// Close the connection and release the remote session.
    pub fn close(&mut self) {
        if self.registration.close() {
            debug!(nick = %self.client_nick(), "Session closed");
        }
        if let Some(showdown) = self.showdown.take() {
            showdown.close();
        }
        self.events = None;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registration", &self.registration)
            .field("nickname", &self.nickname.get())
            .field("requested_nick", &self.requested_nick)
            .field("connected", &self.showdown.is_some())
            .finish_non_exhaustive()
    }
}
