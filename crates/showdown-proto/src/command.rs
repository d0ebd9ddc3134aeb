//! Outbound command framing.
//!
//! Everything the client sends is a single text frame of the form
//! `ROOMID|TEXT`. Text starting with `/` is a command; the global room is the
//! empty room id.

use crate::id::RoomId;

fn slash_command(kind: &str, payload: &str) -> String {
    if payload.is_empty() {
        format!("/{kind}")
    } else {
        format!("/{kind} {payload}")
    }
}

/// A command not bound to any room, e.g. `|/join lobby`.
pub fn global_command(kind: &str, payload: &str) -> String {
    format!("|{}", slash_command(kind, payload))
}

/// A command executed in `room`, e.g. `techcode|/part`.
pub fn room_command(room: &RoomId, kind: &str, payload: &str) -> String {
    format!("{room}|{}", slash_command(kind, payload))
}

/// A chat message said in `room`.
///
/// A leading `/` is doubled so the text is shown as typed rather than run
/// as a command.
pub fn room_reply(room: &RoomId, text: &str) -> String {
    if text.starts_with('/') {
        format!("{room}|/{text}")
    } else {
        format!("{room}|{text}")
    }
}
