//! MODE handler.

use super::{Context, Handler};
use crate::error::HandlerResult;
use async_trait::async_trait;
use irc_proto::{Message, Response};
use tracing::debug;

/// Modes reported for every channel.
const CHANNEL_MODES: &str = "+ntc";

/// Handler for MODE command.
///
/// A query (`MODE #room`) reports a fixed mode string. Mode changes are
/// not supported and are dropped.
pub struct ModeHandler;

#[async_trait]
impl Handler for ModeHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        match msg.params.as_slice() {
            [target] => {
                let reply = Response::rpl_channelmodeis(&ctx.nick(), target, CHANNEL_MODES);
                ctx.send_from_server(reply).await
            }
            params => {
                debug!(?params, "Ignoring MODE change");
                Ok(())
            }
        }
    }
}
