//! NICK command handler.

use super::super::{Context, Handler};
use super::continue_connection;
use crate::error::{HandlerError, HandlerResult};
use crate::state::{Half, Transition};
use async_trait::async_trait;
use irc_proto::Message;
use tracing::debug;

/// Handler for NICK command.
///
/// The nick a client asks for is only remembered so it can be told about
/// the name it really gets: the remote identity comes from USER's realname.
/// Changing nick after registration is not supported and is ignored.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let nick = match msg.arg(0) {
            Some(n) if !n.is_empty() => n,
            _ => return Err(HandlerError::NeedMoreParams),
        };

        if !ctx.session.registration.is_registered() {
            ctx.session.requested_nick = Some(nick.to_string());
        }

        match ctx.session.registration.advance(Half::Nick) {
            Transition::Completed => continue_connection(ctx).await,
            Transition::Pending => {
                debug!(nick = %nick, "NICK received");
                Ok(())
            }
            Transition::Unchanged => {
                debug!(nick = %nick, "Ignoring repeated NICK");
                Ok(())
            }
        }
    }
}
