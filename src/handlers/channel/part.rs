//! PART command handler.

use super::super::{Context, Handler};
use super::resolve_room;
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use irc_proto::{Message, Response};
use tracing::debug;

/// Handler for PART command.
///
/// `PART <room>{,<room>} [:<reason>]`
///
/// The reason is not forwarded; the remote service has no part message.
pub struct PartHandler;

#[async_trait]
impl Handler for PartHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let showdown = ctx.showdown()?;
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        for channel in channels.split(',') {
            let Some(room) = resolve_room(channel) else {
                ctx.send_from_server(Response::err_nosuchchannel(&ctx.nick(), channel))
                    .await?;
                continue;
            };
            debug!(room = %room, "Leaving room");
            showdown.room(room).send_command("part", "");
        }
        Ok(())
    }
}
