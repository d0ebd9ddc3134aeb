//! OPER handler. Operator status is never granted.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use irc_proto::{Message, Response};

/// Handler for OPER command.
///
/// `OPER <name> <password>`
pub struct OperHandler;

#[async_trait]
impl Handler for OperHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if msg.params.len() < 2 {
            return Err(HandlerError::NeedMoreParams);
        }
        ctx.send_from_server(Response::err_nooperhost(&ctx.nick()))
            .await
    }
}
