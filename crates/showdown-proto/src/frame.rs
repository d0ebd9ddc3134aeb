//! Inbound frame parsing.
//!
//! A server frame is one WebSocket text message:
//!
//! ```text
//! >ROOMID
//! |KIND|ARG|ARG
//! plain log text
//! ```
//!
//! The `>ROOMID` header is optional; frames without one belong to the lobby
//! (global notifications such as `challstr` and `pm` arrive that way).

use crate::id::RoomId;

/// A parsed server frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub room: RoomId,
    pub events: Vec<Event>,
}

/// One line of a server frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `|c|USER|MESSAGE`, `|chat|...` and `|c:|TIMESTAMP|USER|MESSAGE`.
    Chat {
        user: String,
        message: String,
        timestamp: Option<i64>,
    },
    /// `|pm|SENDER|RECEIVER|MESSAGE`
    Pm {
        from: String,
        to: String,
        message: String,
    },
    /// `|j|USER`, `|J|USER`, `|join|USER`
    Join { user: String },
    /// `|l|USER`, `|L|USER`, `|leave|USER`
    Leave { user: String },
    /// `|n|USER|OLDID`, `|N|...`, `|name|...`
    Rename { user: String, old_id: String },
    /// `|init|ROOMTYPE`: we joined the room.
    Init { room_type: String },
    /// `|deinit`: we left the room.
    Deinit,
    /// `|title|TITLE`
    Title(String),
    /// `|users|COUNT,USER,USER...` with the leading count removed.
    Users(Vec<String>),
    /// `|challstr|CHALLSTR`
    Challstr(String),
    /// `|updateuser|USER|NAMED|AVATAR|...`
    UpdateUser { user: String, named: bool },
    /// `|nametaken|NAME|MESSAGE`
    NameTaken { name: String, message: String },
    /// `|popup|MESSAGE`; `||` in the message is a line break.
    Popup(String),
    /// `|raw|HTML`
    Raw(String),
    /// `|html|HTML`
    Html(String),
    /// `|error|MESSAGE`
    Error(String),
    /// A line without a leading `|`.
    Text(String),
    /// Any other `|kind|...` line.
    Other { kind: String, args: Vec<String> },
}

/// How many `|`-separated fields a kind takes before the rest of the line
/// is one final field. `None` splits everything.
fn field_count(kind: &str) -> Option<usize> {
    match kind {
        "c" | "chat" | "nametaken" => Some(2),
        "c:" | "pm" => Some(3),
        "challstr" | "popup" | "raw" | "html" | "error" | "title" => Some(1),
        _ => None,
    }
}

fn split_fields(rest: &str, kind: &str) -> Vec<String> {
    match field_count(kind) {
        Some(n) => rest.splitn(n, '|').map(str::to_string).collect(),
        None => rest.split('|').map(str::to_string).collect(),
    }
}

impl Event {
    /// Parse one line of a frame. Returns `None` for blank lines.
    pub fn from_line(line: &str) -> Option<Event> {
        if line.is_empty() {
            return None;
        }
        let Some(body) = line.strip_prefix('|') else {
            return Some(Event::Text(line.to_string()));
        };
        let (kind, rest) = match body.split_once('|') {
            Some((kind, rest)) => (kind, Some(rest)),
            None => (body, None),
        };
        let mut args = rest.map(|r| split_fields(r, kind)).unwrap_or_default();
        let mut take = |i: usize| args.get_mut(i).map(std::mem::take).unwrap_or_default();

        let event = match kind {
            "c" | "chat" => Event::Chat {
                user: take(0),
                message: take(1),
                timestamp: None,
            },
            "c:" => {
                let timestamp = take(0).parse().ok();
                Event::Chat {
                    user: take(1),
                    message: take(2),
                    timestamp,
                }
            }
            "pm" => Event::Pm {
                from: take(0),
                to: take(1),
                message: take(2),
            },
            "j" | "J" | "join" => Event::Join { user: take(0) },
            "l" | "L" | "leave" => Event::Leave { user: take(0) },
            "n" | "N" | "name" => Event::Rename {
                user: take(0),
                old_id: take(1),
            },
            "init" => Event::Init { room_type: take(0) },
            "deinit" => Event::Deinit,
            "title" => Event::Title(take(0)),
            "users" => Event::Users(take(0).split(',').skip(1).map(str::to_string).collect()),
            "challstr" => Event::Challstr(take(0)),
            "updateuser" => {
                let user = take(0);
                Event::UpdateUser {
                    user,
                    named: take(1) == "1",
                }
            }
            "nametaken" => Event::NameTaken {
                name: take(0),
                message: take(1),
            },
            "popup" => Event::Popup(take(0)),
            "raw" => Event::Raw(take(0)),
            "html" => Event::Html(take(0)),
            "error" => Event::Error(take(0)),
            _ => Event::Other {
                kind: kind.to_string(),
                args,
            },
        };
        Some(event)
    }
}

impl Frame {
    /// Parse a whole WebSocket text message.
    pub fn parse(text: &str) -> Frame {
        let mut lines = text.split('\n').map(|l| l.trim_end_matches('\r')).peekable();
        let room = match lines.peek().and_then(|l| l.strip_prefix('>')) {
            Some(id) => {
                let room = RoomId::from(id);
                lines.next();
                room
            }
            None => RoomId::lobby(),
        };
        Frame {
            room,
            events: lines.filter_map(Event::from_line).collect(),
        }
    }
}
