//! # showdown-proto
//!
//! The remote half of the gateway: the Pokémon Showdown chat protocol.
//!
//! - [`id`]: identifier canonicalization (`to_id`, [`RoomId`])
//! - [`command`]: framing of outbound commands and room messages
//! - [`frame`]: parsing inbound WebSocket frames into [`Event`]s
//! - [`login`]: obtaining a login assertion for a `challstr`
//! - [`client`]: a WebSocket session with fire-and-forget sends
//!
//! ```rust
//! use showdown_proto::{command, to_id, RoomId};
//!
//! assert_eq!(to_id("Red Pikachu!"), "redpikachu");
//! let room = RoomId::from("techcode");
//! assert_eq!(command::room_reply(&room, "/not a command"), "techcode|//not a command");
//! ```

#![deny(clippy::all)]

pub mod client;
pub mod command;
pub mod error;
pub mod frame;
pub mod id;
pub mod login;

pub use client::{Client, ClientConfig, ClientEvent, Credentials, Room};
pub use error::Error;
pub use frame::{Event, Frame};
pub use id::{to_id, RoomId};
pub use login::LoginError;
