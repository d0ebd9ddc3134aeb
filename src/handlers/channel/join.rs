//! JOIN command handler.

use super::super::{Context, Handler};
use super::resolve_room;
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use irc_proto::{Message, Response};
use tracing::debug;

/// Handler for JOIN command.
///
/// `JOIN <room>{,<room>}`
///
/// Sends one `/join` per listed room. Membership is confirmed
/// asynchronously when the remote `init` event is relayed back. A name that
/// can't be a room id gets 403 and the rest of the list still goes out.
pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let showdown = ctx.showdown()?;
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        for channel in channels.split(',') {
            let Some(room) = resolve_room(channel) else {
                ctx.send_from_server(Response::err_nosuchchannel(&ctx.nick(), channel))
                    .await?;
                continue;
            };
            debug!(room = %room, "Joining room");
            showdown.send_global_command("join", room.as_str());
        }
        Ok(())
    }
}
