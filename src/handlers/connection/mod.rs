//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, PING, PONG and QUIT, plus the welcome burst
//! sent once NICK and USER have both arrived.

mod nick;
mod pass;
mod ping;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler, QuitHandler};
pub use user::UserHandler;
pub(crate) use welcome::continue_connection;
