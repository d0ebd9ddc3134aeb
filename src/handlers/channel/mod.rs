//! Room membership handlers: JOIN and PART.

mod join;
mod part;

pub use join::JoinHandler;
pub use part::PartHandler;

use crate::escape::unescape_room;
use showdown_proto::{RoomId, to_id};

/// Resolve one entry of a channel list to a room.
///
/// The leading `#` is optional. Names with nothing left after
/// canonicalization go to the lobby. Names that can't be framed as a room
/// id resolve to nothing.
fn resolve_room(channel: &str) -> Option<RoomId> {
    let room = unescape_room(channel);
    if !room.is_valid() {
        None
    } else if to_id(room.as_str()).is_empty() {
        Some(RoomId::lobby())
    } else {
        Some(room)
    }
}
