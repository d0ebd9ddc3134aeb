//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC messages to appropriate handlers. Handlers run one at a time
//! per connection and never wait on the remote service: every remote call is
//! a queued send.

mod cap;
mod channel;
mod connection;
mod core;
pub mod helpers;
mod messaging;
mod mode;
mod oper;
mod user_query;

#[cfg(test)]
pub(crate) mod testing;

pub use self::core::{Context, Handler, Registry};
pub use cap::CapHandler;
pub use channel::{JoinHandler, PartHandler};
pub use connection::{
    NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
};
pub use helpers::{server_notice, server_reply};
pub use messaging::PrivmsgHandler;
pub use mode::ModeHandler;
pub use oper::OperHandler;
pub use user_query::UserhostHandler;
