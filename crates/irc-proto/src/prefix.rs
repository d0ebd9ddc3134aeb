//! Message source prefixes.

use std::fmt;

/// The source of an IRC message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// A server name, e.g. `irc.example.net`.
    ServerName(String),
    /// A user, as `nick!user@host`.
    Nickname(String, String, String),
}

impl Prefix {
    /// Parse a prefix as it appears on the wire (without the leading `:`).
    ///
    /// Anything without `!` or `@` is treated as a server name.
    pub fn new_from_str(s: &str) -> Self {
        match s.split_once('!') {
            Some((nick, rest)) => {
                let (user, host) = rest.split_once('@').unwrap_or((rest, ""));
                Prefix::Nickname(nick.to_string(), user.to_string(), host.to_string())
            }
            None => match s.split_once('@') {
                Some((nick, host)) => {
                    Prefix::Nickname(nick.to_string(), String::new(), host.to_string())
                }
                None => Prefix::ServerName(s.to_string()),
            },
        }
    }

    /// The nickname, or the server name for server prefixes.
    pub fn name(&self) -> &str {
        match self {
            Prefix::ServerName(name) => name,
            Prefix::Nickname(nick, _, _) => nick,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{user}")?;
                }
                if !host.is_empty() {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
        }
    }
}
