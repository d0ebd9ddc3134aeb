//! Remote event relay.
//!
//! Turns the event stream of one remote session into IRC lines for the
//! client that owns it. Runs as its own task next to the command loop and
//! writes through the same outbound queue, so lines from both never
//! interleave.

use crate::escape::{escape_room, escape_user, escape_user_with_host};
use crate::handlers::{server_notice, server_reply};
use crate::state::SharedNick;
use irc_proto::{Message, Prefix, Response};
use regex::Regex;
use showdown_proto::id::split_rank;
use showdown_proto::{ClientEvent, Event, Frame, RoomId, to_id};
use std::collections::HashMap;
use std::sync::LazyLock;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// NAMES entries per 353 line.
const NAMES_PER_LINE: usize = 40;

static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Relay state for one client.
#[derive(Debug, Clone)]
pub struct Relay {
    server_name: String,
    /// The client's remote name.
    name: String,
    /// The client's IRC nick, shared with the command loop.
    nick: SharedNick,
    /// Display names of the users in each joined room, by user id.
    rosters: HashMap<RoomId, HashMap<String, String>>,
}

impl Relay {
    pub fn new(server_name: &str, remote_name: &str, nick: SharedNick) -> Self {
        Self {
            server_name: server_name.to_string(),
            name: remote_name.to_string(),
            nick,
            rosters: HashMap::new(),
        }
    }

    /// Forward events to `sender` until the stream ends, the client goes
    /// away or `cancel` fires. A remote disconnect cancels `cancel` so the
    /// connection closes with it.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<ClientEvent>,
        sender: mpsc::Sender<Message>,
        cancel: CancellationToken,
    ) {
        loop {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };
            let Some(event) = event else {
                break;
            };

            let disconnected = matches!(event, ClientEvent::Disconnected(_));
            for msg in self.translate(event) {
                if sender.send(msg).await.is_err() {
                    debug!("Client queue closed, stopping relay");
                    return;
                }
            }
            if disconnected {
                cancel.cancel();
                break;
            }
        }
        debug!(nick = %self.nick, "Relay stopped");
    }

    /// Translate one session event into client lines.
    pub fn translate(&mut self, event: ClientEvent) -> Vec<Message> {
        let mut out = Vec::new();
        match event {
            ClientEvent::Connected => {
                info!(nick = %self.nick, "Remote session connected");
                out.push(self.notice("Connected to the chat server"));
            }
            ClientEvent::LoginFailed(reason) => {
                warn!(nick = %self.nick, reason = %reason, "Remote login failed");
                out.push(self.notice(&format!("Login failed: {reason}")));
            }
            ClientEvent::Disconnected(reason) => {
                info!(nick = %self.nick, reason = ?reason, "Remote session closed");
                let reason = reason.unwrap_or_else(|| "Remote server closed the connection".into());
                out.push(Message::error(&format!("Closing Link: {reason}")));
            }
            ClientEvent::Frame(frame) => self.frame(frame, &mut out),
        }
        out
    }

    fn frame(&mut self, frame: Frame, out: &mut Vec<Message>) {
        let Frame { room, events } = frame;
        for event in events {
            self.event(&room, event, out);
        }
    }

    fn event(&mut self, room: &RoomId, event: Event, out: &mut Vec<Message>) {
        let channel = escape_room(room);
        match event {
            Event::Chat { user, message, .. } => {
                let (_, name) = split_rank(&user);
                self.remember(room, name);
                if !self.is_self(name) {
                    self.chat(name, &channel, &message, out);
                }
            }
            Event::Pm { from, message, .. } => {
                let (_, name) = split_rank(&from);
                if !self.is_self(name) {
                    let target = self.nick.get();
                    self.chat(name, &target, &message, out);
                }
            }
            Event::Join { user } => {
                let (_, name) = split_rank(&user);
                self.remember(room, name);
                if !self.is_self(name) {
                    out.push(Message::new("JOIN", [channel]).with_prefix(escape_user_with_host(name)));
                }
            }
            Event::Leave { user } => {
                let (_, name) = split_rank(&user);
                if let Some(roster) = self.rosters.get_mut(room) {
                    roster.remove(&to_id(name));
                }
                if !self.is_self(name) {
                    out.push(Message::new("PART", [channel]).with_prefix(escape_user_with_host(name)));
                }
            }
            Event::Rename { user, old_id } => {
                let (_, name) = split_rank(&user);
                let known = self
                    .rosters
                    .get_mut(room)
                    .and_then(|roster| roster.remove(&old_id));
                self.remember(room, name);
                // The client's own renames arrive as `updateuser`.
                if old_id == to_id(&self.name) || self.is_self(name) {
                    return;
                }
                let old_name = known.unwrap_or(old_id);
                let nick = escape_user(name);
                if escape_user(&old_name) != nick {
                    out.push(Message::new("NICK", [nick]).with_prefix(escape_user_with_host(&old_name)));
                }
            }
            Event::Init { room_type } => {
                debug!(room = %room, room_type = %room_type, "Joined room");
                self.rosters.entry(room.clone()).or_default();
                out.push(Message::new("JOIN", [channel]).with_prefix(self.own_prefix()));
            }
            Event::Deinit => {
                self.rosters.remove(room);
                out.push(Message::new("PART", [channel]).with_prefix(self.own_prefix()));
            }
            Event::Title(title) => {
                out.push(server_reply(
                    &self.server_name,
                    Response::RPL_TOPIC,
                    vec![self.nick.get(), channel, title],
                ));
            }
            Event::Users(users) => {
                let roster = self.rosters.entry(room.clone()).or_default();
                roster.clear();
                for user in &users {
                    let (_, name) = split_rank(user);
                    let id = to_id(name);
                    if !id.is_empty() {
                        roster.insert(id, name.to_string());
                    }
                }
                self.names(&channel, &users, out);
            }
            Event::UpdateUser { user, named } => {
                let (_, name) = split_rank(&user);
                let nick = escape_user(name);
                if named && !name.is_empty() && nick != self.nick.get() {
                    out.push(Message::new("NICK", [nick.as_str()]).with_prefix(self.own_prefix()));
                    info!(old = %self.nick, new = %nick, "Remote renamed the client");
                    self.nick.set(nick);
                    self.name = name.to_string();
                }
            }
            Event::NameTaken { name, message } => {
                out.push(self.notice(&format!("Name \"{name}\" is unavailable: {message}")));
            }
            Event::Popup(text) => {
                for line in text.split("||").filter(|l| !l.is_empty()) {
                    out.push(self.notice(line));
                }
            }
            Event::Error(text) => out.push(self.room_notice(room, &channel, &text)),
            Event::Raw(html) | Event::Html(html) => {
                let text = strip_html(&html);
                if !text.trim().is_empty() {
                    out.push(self.room_notice(room, &channel, &text));
                }
            }
            Event::Text(text) => out.push(self.room_notice(room, &channel, &text)),
            Event::Challstr(_) => {}
            Event::Other { kind, .. } => {
                debug!(room = %room, kind = %kind, "Ignoring event");
            }
        }
    }

    /// Chat text from `name` to `target`, where commands the service left
    /// in the text are rendered the way an IRC client expects.
    fn chat(&self, name: &str, target: &str, message: &str, out: &mut Vec<Message>) {
        let prefix = if to_id(name).is_empty() {
            Prefix::ServerName(self.server_name.clone())
        } else {
            escape_user_with_host(name)
        };

        let msg = if let Some(action) = message.strip_prefix("/me ") {
            Message::privmsg(target, &format!("\x01ACTION {action}\x01"))
        } else if let Some(escaped) = message.strip_prefix("//") {
            Message::privmsg(target, &format!("/{escaped}"))
        } else if let Some(text) = message
            .strip_prefix("/announce ")
            .or_else(|| message.strip_prefix("/log "))
        {
            Message::notice(target, text)
        } else if message.starts_with('/') {
            debug!(target = %target, "Hiding chat command");
            return;
        } else {
            Message::privmsg(target, message)
        };
        out.push(msg.with_prefix(prefix));
    }

    fn names(&self, channel: &str, users: &[String], out: &mut Vec<Message>) {
        let nick = self.nick.get();
        let names: Vec<String> = users
            .iter()
            .filter_map(|user| {
                let (rank, name) = split_rank(user);
                (!name.is_empty()).then(|| format!("{}{}", irc_rank(rank), escape_user(name)))
            })
            .collect();

        for chunk in names.chunks(NAMES_PER_LINE) {
            out.push(server_reply(
                &self.server_name,
                Response::RPL_NAMREPLY,
                vec![
                    nick.clone(),
                    "=".to_string(),
                    channel.to_string(),
                    chunk.join(" "),
                ],
            ));
        }
        out.push(server_reply(
            &self.server_name,
            Response::RPL_ENDOFNAMES,
            vec![
                nick,
                channel.to_string(),
                "End of /NAMES list.".to_string(),
            ],
        ));
    }

    /// Record `name` as the current display name in a room we are in.
    fn remember(&mut self, room: &RoomId, name: &str) {
        let id = to_id(name);
        if id.is_empty() {
            return;
        }
        if let Some(roster) = self.rosters.get_mut(room) {
            roster.insert(id, name.to_string());
        }
    }

    fn is_self(&self, name: &str) -> bool {
        let own_id = to_id(&self.name);
        !own_id.is_empty() && to_id(name) == own_id
    }

    fn own_prefix(&self) -> Prefix {
        escape_user_with_host(&self.name)
    }

    fn notice(&self, text: &str) -> Message {
        server_notice(&self.server_name, &self.nick.get(), text)
    }

    /// Room output goes to the channel; output with no room goes to the
    /// client directly.
    fn room_notice(&self, room: &RoomId, channel: &str, text: &str) -> Message {
        if room.is_lobby() {
            server_notice(&self.server_name, &self.nick.get(), text)
        } else {
            server_notice(&self.server_name, channel, text)
        }
    }
}

/// Map a remote room rank to an IRC membership prefix.
fn irc_rank(rank: Option<char>) -> &'static str {
    match rank {
        Some('~' | '#') => "~",
        Some('&') => "&",
        Some('@') => "@",
        Some('%') => "%",
        Some('+' | '*') => "+",
        _ => "",
    }
}

/// Reduce an HTML fragment to its text.
fn strip_html(html: &str) -> String {
    let text = match HTML_TAG.as_ref() {
        Some(re) => re.replace_all(html, "").into_owned(),
        None => html.to_string(),
    };
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;

    fn relay() -> Relay {
        let nick = SharedNick::default();
        nick.set("Red");
        Relay::new("irc.test", "Red", nick)
    }

    fn frame(text: &str) -> ClientEvent {
        ClientEvent::Frame(Frame::parse(text))
    }

    fn lines(relay: &mut Relay, event: ClientEvent) -> Vec<String> {
        relay.translate(event).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn room_chat_becomes_privmsg() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, frame(">techcode\n|c|+Bob Smith|hello | world")),
            vec![":Bob\u{a0}Smith!bobsmith@showdown PRIVMSG #techcode :hello | world"]
        );
    }

    #[test]
    fn own_messages_are_not_echoed() {
        let mut r = relay();
        assert!(lines(&mut r, frame(">lobby\n|c| Red|hi")).is_empty());
        assert!(lines(&mut r, frame("|pm| Red| Bob|hi")).is_empty());
    }

    #[test]
    fn chat_commands() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, frame(">a\n|c| Bob|/me waves\n|c| Bob|//slash\n|c| Bob|/announce Hey\n|c| Bob|/raw <b>x</b>")),
            vec![
                ":Bob!bob@showdown PRIVMSG #a :\x01ACTION waves\x01",
                ":Bob!bob@showdown PRIVMSG #a /slash",
                ":Bob!bob@showdown NOTICE #a Hey",
            ]
        );
    }

    #[test]
    fn private_messages_target_the_client() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, frame("|pm|+Bob| Red|psst")),
            vec![":Bob!bob@showdown PRIVMSG Red psst"]
        );
    }

    #[test]
    fn membership_events() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, frame(">room\n|init|chat\n|title|The Room\n|users|3,@Mod, Red,*Bot\n|j| Ann\n|l| Ann\n|n| Anne|ann\n|deinit")),
            vec![
                ":Red!red@showdown JOIN #room",
                ":irc.test 332 Red #room :The Room",
                ":irc.test 353 Red = #room :@Mod Red +Bot",
                ":irc.test 366 Red #room :End of /NAMES list.",
                ":Ann!ann@showdown JOIN #room",
                ":Ann!ann@showdown PART #room",
                ":ann!ann@showdown NICK Anne",
                ":Red!red@showdown PART #room",
            ]
        );
    }

    #[test]
    fn renames_start_from_the_known_display_name() {
        let mut r = relay();
        lines(&mut r, frame(">room\n|init|chat\n|users|2, Red, Ann Smith"));
        assert_eq!(
            lines(&mut r, frame(">room\n|n| ann smith|annsmith")),
            vec![":Ann\u{a0}Smith!annsmith@showdown NICK ann\u{a0}smith"]
        );
        assert_eq!(
            lines(&mut r, frame(">room\n|n| Ann B|annsmith")),
            vec![":ann\u{a0}smith!annsmith@showdown NICK Ann\u{a0}B"]
        );
        assert!(lines(&mut r, frame(">room\n|n| Ann B|annb")).is_empty());
    }

    #[test]
    fn own_renames_in_rooms_are_left_to_updateuser() {
        let mut r = relay();
        lines(&mut r, frame(">room\n|init|chat\n|users|1, Red"));
        assert!(lines(&mut r, frame(">room\n|n| Red Two|red")).is_empty());
        lines(&mut r, frame("|updateuser| Red Three|1|1"));
        assert!(lines(&mut r, frame(">room\n|n| Red Three|redtwo")).is_empty());
    }

    #[test]
    fn rosters_follow_leaves_and_deinit() {
        let mut r = relay();
        lines(&mut r, frame(">room\n|init|chat\n|j| Ann Smith"));
        assert_eq!(r.rosters[&RoomId::from("room")]["annsmith"], "Ann Smith");
        lines(&mut r, frame(">room\n|l| Ann Smith"));
        assert!(r.rosters[&RoomId::from("room")].is_empty());
        lines(&mut r, frame(">room\n|deinit"));
        assert!(r.rosters.is_empty());
    }

    #[test]
    fn own_join_is_only_reported_by_init() {
        let mut r = relay();
        assert!(lines(&mut r, frame(">room\n|j| Red")).is_empty());
    }

    #[test]
    fn rename_of_client_follows_updateuser() {
        let mut r = relay();
        assert!(lines(&mut r, frame("|updateuser| Guest 1|0|1")).is_empty());
        assert!(lines(&mut r, frame("|updateuser| Red|1|1")).is_empty());
        assert_eq!(
            lines(&mut r, frame("|updateuser| Red Two|1|1")),
            vec![":Red!red@showdown NICK Red\u{a0}Two"]
        );
        assert_eq!(
            lines(&mut r, frame(">lobby\n|c| Bob|hi Red Two")),
            vec![":Bob!bob@showdown PRIVMSG #lobby :hi Red Two"]
        );
    }

    #[tokio::test]
    async fn remote_rename_reaches_later_replies() {
        let mut h = Harness::new();
        h.register("Red").await;
        let mut r = Relay::new("irc.test", "Red", h.session.nickname.clone());

        assert_eq!(
            lines(&mut r, frame("|updateuser| Red Two|1|1")),
            vec![":Red!red@showdown NICK Red\u{a0}Two"]
        );
        h.line("MODE #lobby").await.unwrap();
        assert_eq!(h.drain_lines(), vec![":irc.test 324 Red\u{a0}Two #lobby +ntc :"]);
    }

    #[test]
    fn notices() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, frame("|popup|Line one||Line two\n|nametaken|Red|Taken")),
            vec![
                ":irc.test NOTICE Red :Line one",
                ":irc.test NOTICE Red :Line two",
                ":irc.test NOTICE Red :Name \"Red\" is unavailable: Taken",
            ]
        );
        assert_eq!(
            lines(&mut r, frame(">room\n|raw|<div class=\"x\">A &amp; B</div>\n|error|Muted\nsome log text")),
            vec![
                ":irc.test NOTICE #room :A & B",
                ":irc.test NOTICE #room Muted",
                ":irc.test NOTICE #room :some log text",
            ]
        );
    }

    #[test]
    fn session_lifecycle() {
        let mut r = relay();
        assert_eq!(
            lines(&mut r, ClientEvent::LoginFailed("bad password".into())),
            vec![":irc.test NOTICE Red :Login failed: bad password"]
        );
        assert_eq!(
            lines(&mut r, ClientEvent::Disconnected(None)),
            vec!["ERROR :Closing Link: Remote server closed the connection"]
        );
        assert!(lines(&mut r, frame("|challstr|4|abc\n|:|123")).is_empty());
    }

    #[test]
    fn ranks_map_to_prefixes() {
        assert_eq!(irc_rank(Some('#')), "~");
        assert_eq!(irc_rank(Some('*')), "+");
        assert_eq!(irc_rank(Some('!')), "");
        assert_eq!(irc_rank(None), "");
    }

    #[tokio::test]
    async fn disconnect_cancels_the_connection() {
        let (event_tx, events) = mpsc::channel(4);
        let (sender, mut client) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(relay().run(events, sender, cancel.clone()));

        event_tx
            .send(frame(">lobby\n|c| Bob|hi"))
            .await
            .unwrap();
        event_tx.send(ClientEvent::Disconnected(Some("gone".into()))).await.unwrap();
        task.await.unwrap();

        assert_eq!(client.recv().await.unwrap().command, "PRIVMSG");
        assert_eq!(client.recv().await.unwrap().to_string(), "ERROR :Closing Link: gone");
        assert!(cancel.is_cancelled());
    }
}
