//! CAP handler.

use super::{Context, Handler};
use crate::error::HandlerResult;
use async_trait::async_trait;
use irc_proto::Message;
use tracing::debug;

/// Handler for CAP command.
///
/// No capabilities are offered. Clients that send `CAP LS` go on to
/// register without waiting once they see the welcome burst, so nothing is
/// sent back.
pub struct CapHandler;

#[async_trait]
impl Handler for CapHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        debug!(subcommand = ?msg.arg(0), "Ignoring CAP");
        Ok(())
    }
}
