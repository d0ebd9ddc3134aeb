//! Reply builders shared by handlers and the event relay.

use irc_proto::{Message, Prefix, Response};

/// A numeric reply with the server as its source.
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    Message::response(response, params).with_prefix(Prefix::ServerName(server_name.to_string()))
}

/// A NOTICE with the server as its source.
pub fn server_notice(server_name: &str, target: &str, text: &str) -> Message {
    Message::notice(target, text).with_prefix(Prefix::ServerName(server_name.to_string()))
}
