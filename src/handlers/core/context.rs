//! Command handler context.
//!
//! Defines the `Context<'a>` struct passed to all handlers and the
//! `Handler` trait they implement.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::helpers::server_reply;
use crate::showdown::{Connector, ShowdownSession};
use crate::state::{ServerInfo, Session};
use async_trait::async_trait;
use irc_proto::{Message, Prefix, Response};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// Server identity used as the source of replies.
    pub server: &'a ServerInfo,
    /// State of the connection being served.
    pub session: &'a mut Session,
    /// Sender for outgoing messages to this client.
    pub sender: &'a mpsc::Sender<Message>,
    /// Opens the remote session when registration completes.
    pub connector: &'a dyn Connector,
}

impl<'a> Context<'a> {
    pub fn new(
        server: &'a ServerInfo,
        session: &'a mut Session,
        sender: &'a mpsc::Sender<Message>,
        connector: &'a dyn Connector,
    ) -> Self {
        Self {
            server,
            session,
            sender,
            connector,
        }
    }

    #[inline]
    pub fn server_prefix(&self) -> Prefix {
        Prefix::ServerName(self.server.name.clone())
    }

    /// The nick to address this client by.
    #[inline]
    pub fn nick(&self) -> String {
        self.session.client_nick()
    }

    /// Queue a message for the client as-is.
    pub async fn send(&self, msg: Message) -> HandlerResult {
        self.sender.send(msg).await?;
        Ok(())
    }

    /// Queue a message with the server as its source.
    pub async fn send_from_server(&self, msg: Message) -> HandlerResult {
        self.send(msg.with_prefix(self.server_prefix())).await
    }

    /// Build and send a server numeric addressed to this client.
    pub async fn send_reply(&self, response: Response, params: Vec<String>) -> HandlerResult {
        let mut full = Vec::with_capacity(params.len() + 1);
        full.push(self.nick());
        full.extend(params);
        self.send(server_reply(&self.server.name, response, full))
            .await
    }

    /// The remote session, or `NotRegistered` before registration completes.
    pub fn showdown(&self) -> Result<Arc<dyn ShowdownSession>, HandlerError> {
        self.session
            .showdown()
            .cloned()
            .ok_or(HandlerError::NotRegistered)
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
