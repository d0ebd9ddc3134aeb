//! PRIVMSG handler: relays client messages to rooms and users.

use super::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::escape::{unescape_room, unescape_user};
use async_trait::async_trait;
use irc_proto::{Message, irc_eq};
use tracing::debug;

/// Services name clients message on connect. There is no such service.
const NICKSERV: &str = "NickServ";

/// Message body after CTCP unwrapping.
#[derive(Debug, PartialEq, Eq)]
enum Body<'a> {
    Plain(&'a str),
    /// `\x01ACTION text\x01`
    Action(&'a str),
    /// Any other CTCP request.
    Ctcp,
}

impl<'a> Body<'a> {
    fn parse(text: &'a str) -> Self {
        let Some(ctcp) = text.strip_prefix('\x01') else {
            return Body::Plain(text);
        };
        let ctcp = ctcp.strip_suffix('\x01').unwrap_or(ctcp);
        match ctcp.split_once(' ') {
            Some(("ACTION", action)) => Body::Action(action),
            None if ctcp == "ACTION" => Body::Action(""),
            _ => Body::Ctcp,
        }
    }
}

/// Handler for PRIVMSG command.
///
/// `PRIVMSG <target> :<text>`
///
/// A `#room` target becomes a room reply, or `/me` in the room for an
/// action. Anything else is a private message, where an action is spelled
/// out as a `/me ` prefix on the text.
pub struct PrivmsgHandler;

#[async_trait]
impl Handler for PrivmsgHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let showdown = ctx.showdown()?;
        let (Some(target), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        if target.is_empty() {
            return Err(HandlerError::NeedMoreParams);
        }

        let text = unescape_user(text);
        let body = Body::parse(&text);
        if body == Body::Ctcp {
            debug!(target = %target, "Dropping CTCP request");
            return Ok(());
        }

        if target.starts_with('#') {
            let room = unescape_room(target);
            if !room.is_valid() {
                return Err(HandlerError::NoSuchChannel(target.to_string()));
            }
            let room = showdown.room(room);
            match body {
                Body::Action(action) => room.send_command("me", action),
                Body::Plain(text) => room.reply(text),
                Body::Ctcp => {}
            }
        } else if irc_eq(target, NICKSERV) {
            debug!("Dropping message to NickServ");
        } else {
            let user = unescape_user(target);
            let payload = match body {
                Body::Action(action) => format!("{user},/me {action}"),
                _ => format!("{user},{text}"),
            };
            showdown.send_global_command("pm", &payload);
        }

        Ok(())
    }
}
