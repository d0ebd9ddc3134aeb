//! IRC message parsing and serialization.
//!
//! Implements the RFC 2812 line format:
//!
//! ```text
//! [':' prefix SPACE] command [SPACE params] [SPACE ':' trailing]
//! ```
//!
//! Parsing works on a line without its terminator. Message tags are not
//! negotiated by the gateway; a leading tag section is skipped.

use crate::prefix::Prefix;
use crate::response::Response;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A parsed IRC message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Optional message source.
    pub prefix: Option<Prefix>,
    /// The command verb or three-digit numeric, as sent.
    pub command: String,
    /// Parameters; the last one may have been a trailing parameter.
    pub params: Vec<String>,
}

/// Errors that can occur while parsing a line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line was empty or whitespace only.
    #[error("empty message")]
    Empty,
    /// A prefix or tag section was present but no command followed.
    #[error("prefix present but missing command")]
    MissingCommand,
}

impl Message {
    /// Build a message with no prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Message {
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a numeric reply.
    pub fn response(response: Response, params: Vec<String>) -> Self {
        Message {
            prefix: None,
            command: response.to_string(),
            params,
        }
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: &str, text: &str) -> Self {
        Self::new("PRIVMSG", [target, text])
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", [target, text])
    }

    /// `ERROR :<reason>`
    pub fn error(reason: &str) -> Self {
        Self::new("ERROR", [reason])
    }

    /// Attach a prefix.
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// The `index`-th parameter, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Parse a single line (a trailing `\r\n` is tolerated).
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut rest = input.trim_end_matches(['\r', '\n']).trim_start_matches(' ');

        if rest.starts_with('@') {
            rest = match rest.split_once(' ') {
                Some((_, after)) => after.trim_start_matches(' '),
                None => return Err(ParseError::MissingCommand),
            };
        }

        if rest.is_empty() {
            return Err(ParseError::Empty);
        }

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (source, after) = stripped
                .split_once(' ')
                .ok_or(ParseError::MissingCommand)?;
            rest = after.trim_start_matches(' ');
            Some(Prefix::new_from_str(source))
        } else {
            None
        };

        let (command, mut remaining) = match rest.split_once(' ') {
            Some((command, params)) => (command, params),
            None => (rest, ""),
        };
        if command.is_empty() {
            return Err(ParseError::MissingCommand);
        }

        let mut params = Vec::new();
        loop {
            remaining = remaining.trim_start_matches(' ');
            if remaining.is_empty() {
                break;
            }
            if let Some(trailing) = remaining.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match remaining.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_string());
                    remaining = after;
                }
                None => {
                    params.push(remaining.to_string());
                    break;
                }
            }
        }

        Ok(Message {
            prefix,
            command: command.to_string(),
            params,
        })
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}

/// Whether `param` can only be sent as a trailing parameter.
fn needs_colon_prefix(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        f.write_str(&self.command)?;
        if let Some((last, init)) = self.params.split_last() {
            for param in init {
                write!(f, " {param}")?;
            }
            if needs_colon_prefix(last) {
                write!(f, " :{last}")?;
            } else {
                write!(f, " {last}")?;
            }
        }
        Ok(())
    }
}
