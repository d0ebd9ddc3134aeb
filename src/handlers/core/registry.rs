//! Command registry: maps command names to handlers.

use super::context::{Context, Handler};
use crate::error::HandlerResult;
use crate::handlers::{
    CapHandler, JoinHandler, ModeHandler, NickHandler, OperHandler, PartHandler, PassHandler,
    PingHandler, PongHandler, PrivmsgHandler, QuitHandler, UserHandler, UserhostHandler,
};
use irc_proto::Message;
use std::collections::HashMap;
use tracing::{Instrument, Level, debug, span};

/// Registry of command handlers.
///
/// Lookup is case-sensitive: clients send verbs in upper case and anything
/// else is treated as unknown.
pub struct Registry {
    handlers: HashMap<&'static str, Box<dyn Handler>>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Registration
        handlers.insert("CAP", Box::new(CapHandler));
        handlers.insert("PASS", Box::new(PassHandler));
        handlers.insert("NICK", Box::new(NickHandler));
        handlers.insert("USER", Box::new(UserHandler));
        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert("PONG", Box::new(PongHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));

        // Queries
        handlers.insert("OPER", Box::new(OperHandler));
        handlers.insert("USERHOST", Box::new(UserhostHandler));
        handlers.insert("MODE", Box::new(ModeHandler));

        // Relay
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PART", Box::new(PartHandler));

        Self { handlers }
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// Usage errors are turned into numeric replies here; only fatal errors
    /// are returned to the connection loop.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        if ctx.session.is_closed() {
            debug!(command = %msg.command, "Dropping command on closed session");
            return Ok(());
        }

        let Some(handler) = self.handlers.get(msg.command.as_str()) else {
            debug!(command = %msg.command, "Ignoring unknown command");
            return Ok(());
        };

        let irc_span = span!(
            Level::DEBUG,
            "irc.command",
            command = %msg.command,
            nick = %ctx.nick(),
        );

        match handler.handle(ctx, msg).instrument(irc_span).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!(command = %msg.command, error = e.error_code(), "Command rejected");
                match e.to_irc_reply(&ctx.server.name, &ctx.nick(), &msg.command) {
                    Some(reply) => ctx.send(reply).await,
                    None => Ok(()),
                }
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
