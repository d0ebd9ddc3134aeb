//! Mapping between remote names and IRC-safe names.
//!
//! Remote user names may contain spaces and punctuation that IRC gives
//! meaning to (`!` and `@` split a prefix, `,` separates targets, `:`
//! starts a trailing parameter). Each such character is swapped for a
//! look-alike code point, so the mapping round-trips as long as the
//! original name doesn't already contain the look-alikes.

use irc_proto::Prefix;
use showdown_proto::{RoomId, to_id};

/// Host shown for every remote user.
pub const USER_HOST: &str = "showdown";

const SUBSTITUTIONS: [(char, char); 8] = [
    (' ', '\u{00A0}'),
    ('!', '\u{FF01}'),
    ('@', '\u{FF20}'),
    (',', '\u{FF0C}'),
    (':', '\u{FF1A}'),
    ('*', '\u{FF0A}'),
    ('?', '\u{FF1F}'),
    ('#', '\u{FF03}'),
];

/// Remote name to IRC nick.
pub fn escape_user(name: &str) -> String {
    name.chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(raw, _)| *raw == c)
                .map_or(c, |(_, safe)| *safe)
        })
        .collect()
}

/// IRC nick (or text) back to the remote form.
pub fn unescape_user(nick: &str) -> String {
    nick.chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(_, safe)| *safe == c)
                .map_or(c, |(raw, _)| *raw)
        })
        .collect()
}

fn ident(name: &str) -> String {
    let id = to_id(name);
    if id.is_empty() { "guest".to_string() } else { id }
}

/// Full `nick!id@showdown` prefix for a remote user.
pub fn escape_user_with_host(name: &str) -> Prefix {
    Prefix::Nickname(escape_user(name), ident(name), USER_HOST.to_string())
}

/// `nick=+id@showdown`, one entry of a USERHOST reply.
pub fn userhost_entry(name: &str) -> String {
    let remote = unescape_user(name);
    format!("{}=+{}@{}", escape_user(&remote), ident(&remote), USER_HOST)
}

/// Room id to IRC channel name.
pub fn escape_room(room: &RoomId) -> String {
    format!("#{}", escape_user(room.as_str()))
}

/// IRC channel (with or without `#`) to room id.
pub fn unescape_room(channel: &str) -> RoomId {
    RoomId::from(unescape_user(channel.strip_prefix('#').unwrap_or(channel)))
}
