//! PASS command handler.

use super::super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use async_trait::async_trait;
use irc_proto::Message;
use tracing::debug;

/// Handler for PASS command.
///
/// `PASS password`
///
/// Stores the password used to log in to the remote service. Only accepted
/// before NICK or USER has been seen.
pub struct PassHandler;

#[async_trait]
impl Handler for PassHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let password = match msg.arg(0) {
            Some(p) if !p.is_empty() => p,
            _ => return Err(HandlerError::NeedMoreParams),
        };

        if ctx.session.registration.has_started() {
            return Err(HandlerError::AlreadyRegistered);
        }

        ctx.session.login.password = Some(password.to_string());
        debug!("PASS received");

        Ok(())
    }
}
