//! showdown-ircd - an IRC gateway for Pokémon Showdown chat.
//!
//! Each IRC client that registers gets its own session on the chat server.
//! Client commands are translated into chat server commands, and chat server
//! events are relayed back as IRC lines.

pub mod config;
pub mod error;
pub mod escape;
pub mod handlers;
pub mod network;
pub mod relay;
pub mod showdown;
pub mod state;
