//! USERHOST handler.

use super::{Context, Handler};
use crate::error::HandlerResult;
use crate::escape::userhost_entry;
use async_trait::async_trait;
use irc_proto::{Message, Response};

/// Handler for USERHOST command.
///
/// Every remote user is reported as present on the shared fake host, one
/// 302 reply per queried nick. No arguments means no replies.
pub struct UserhostHandler;

#[async_trait]
impl Handler for UserhostHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        for nick in msg.params.iter().filter(|n| !n.is_empty()) {
            let reply = Response::rpl_userhost(&ctx.nick(), &userhost_entry(nick));
            ctx.send_from_server(reply).await?;
        }
        Ok(())
    }
}
