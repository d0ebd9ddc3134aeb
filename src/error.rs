//! Error handling for command processing.
//!
//! Handler errors fall in three groups: protocol usage errors that become a
//! numeric reply while the connection stays open, send failures on a closed
//! outbound queue, and fatal conditions that end the connection.

use irc_proto::{Message, Prefix, Response};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("not registered")]
    NotRegistered,

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("client quit: {0:?}")]
    Quit(Option<String>),

    /// The remote session could not be opened (ERROR already sent).
    #[error("remote session unavailable: {0}")]
    Remote(String),
}

impl HandlerError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::NotRegistered => "not_registered",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::Send(_) => "send_error",
            Self::Quit(_) => "quit",
            Self::Remote(_) => "remote_unavailable",
        }
    }

    /// Whether the connection must end.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Send(_) | Self::Quit(_) | Self::Remote(_))
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let msg = match self {
            Self::NeedMoreParams => Response::err_needmoreparams(nick, cmd_name),
            Self::AlreadyRegistered => Response::err_alreadyregistred(nick),
            Self::NotRegistered => Response::err_notregistered(nick),
            Self::NoSuchChannel(channel) => Response::err_nosuchchannel(nick, channel),
            Self::Send(_) | Self::Quit(_) | Self::Remote(_) => return None,
        };
        Some(msg.with_prefix(Prefix::ServerName(server_name.to_string())))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
