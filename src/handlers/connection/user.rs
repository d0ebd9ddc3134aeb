//! USER command handler.

use super::super::{Context, Handler};
use super::continue_connection;
use crate::error::{HandlerError, HandlerResult};
use crate::escape::escape_user;
use crate::state::{Half, Transition};
use async_trait::async_trait;
use irc_proto::Message;
use tracing::debug;

/// Handler for USER command.
///
/// `USER <username> <mode> <unused> :<realname>`
///
/// The realname is the name used on the remote service, so it may contain
/// spaces. Arity is checked before anything is recorded.
pub struct UserHandler;

#[async_trait]
impl Handler for UserHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if ctx.session.registration.is_registered() {
            return Err(HandlerError::AlreadyRegistered);
        }

        let Some(realname) = msg.arg(3) else {
            return Err(HandlerError::NeedMoreParams);
        };

        ctx.session.login.nickname = realname.to_string();
        ctx.session.nickname.set(escape_user(realname));

        match ctx.session.registration.advance(Half::User) {
            Transition::Completed => continue_connection(ctx).await,
            _ => {
                debug!(name = %realname, "USER received");
                Ok(())
            }
        }
    }
}
