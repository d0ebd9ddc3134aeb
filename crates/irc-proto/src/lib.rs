//! # irc-proto
//!
//! The client-facing half of the gateway's wire format: parsing and
//! serializing IRC lines, the numeric replies the gateway emits, RFC 1459
//! case mapping, and a `tokio_util` codec for framing a TCP stream.
//!
//! ```rust
//! use irc_proto::{Message, Prefix, Response};
//!
//! let msg = Message::parse(":alice!alice@host PRIVMSG #lobby :hi there").unwrap();
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.arg(1), Some("hi there"));
//!
//! let reply = Response::err_needmoreparams("*", "USER")
//!     .with_prefix(Prefix::ServerName("irc.example".into()));
//! assert_eq!(reply.to_string(), ":irc.example 461 * USER :Not enough parameters");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
#[cfg(feature = "tokio")]
pub mod codec;
pub mod message;
pub mod prefix;
pub mod response;

pub use casemap::{irc_eq, irc_to_lower};
#[cfg(feature = "tokio")]
pub use codec::{CodecError, IrcCodec};
pub use message::{Message, ParseError};
pub use prefix::Prefix;
pub use response::Response;
