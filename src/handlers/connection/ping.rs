//! PING, PONG and QUIT handlers.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use irc_proto::Message;
use tracing::info;

/// Handler for PING command.
///
/// Answers `PONG <server> <args...>` as a raw line without a prefix.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let params = std::iter::once(ctx.server.name.as_str())
            .chain(msg.params.iter().map(String::as_str));
        ctx.send(Message::new("PONG", params)).await
    }
}

/// Handler for PONG command.
pub struct PongHandler;

#[async_trait]
impl Handler for PongHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        Ok(())
    }
}

/// Handler for QUIT command.
///
/// Releases the remote session right away; the connection loop sees the
/// `Quit` error and closes the socket.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let quit_msg = msg.arg(0).map(|s| s.to_string());

        info!(nick = %ctx.nick(), message = ?quit_msg, "Client quit");
        ctx.session.close();

        Err(HandlerError::Quit(quit_msg))
    }
}
