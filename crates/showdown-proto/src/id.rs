//! Identifier canonicalization.
//!
//! Showdown compares user and room names by their *id*: lowercased with
//! everything outside `[a-z0-9]` removed. `"Red Pikachu!"` and `"redpikachu"`
//! are the same user.

use std::fmt;

/// Canonical id of a user or room name.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split the one-character rank off a display name.
///
/// Names in chat events and user lists arrive as `" Bob"`, `"@Mod"` or
/// `"+Voice@!"`; the first character is the rank (a space for regular users)
/// and anything from `@` on is a status marker.
pub fn split_rank(name: &str) -> (Option<char>, &str) {
    let mut chars = name.chars();
    let (rank, rest) = match chars.next() {
        Some(c) if !c.is_alphanumeric() => (Some(c).filter(|c| *c != ' '), chars.as_str()),
        _ => (None, name),
    };
    let rest = match rest.find('@') {
        Some(idx) if idx > 0 => &rest[..idx],
        _ => rest,
    };
    (rank, rest)
}

/// A room identifier as sent to the server.
///
/// The value is kept as given; room names on the wire (`battle-gen9ou-1`)
/// may contain characters `to_id` would strip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        RoomId(id.into())
    }

    /// The default room, also used for frames without a room header.
    pub fn lobby() -> Self {
        RoomId("lobby".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_lobby(&self) -> bool {
        self.0.is_empty() || self.0 == "lobby"
    }

    /// Whether the id can be framed as the room field of an outbound line.
    ///
    /// The server splits `room|text` at the first `|` and ends a message at
    /// a newline, so an id holding either would hand the rest of the id to
    /// the server as message text.
    pub fn is_valid(&self) -> bool {
        !self.0.chars().any(|c| c == '|' || c.is_control())
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        RoomId(id.to_string())
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        RoomId(id)
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
