//! Recording doubles for the remote session facade.

use super::{Connected, Connector, ShowdownRoom, ShowdownSession};
use parking_lot::Mutex;
use showdown_proto::{ClientEvent, Credentials, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One call made on the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Global { kind: String, payload: String },
    RoomCommand { room: String, kind: String, payload: String },
    Reply { room: String, message: String },
    Close,
}

impl Call {
    pub fn global(kind: &str, payload: &str) -> Self {
        Call::Global {
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    pub fn room_command(room: &str, kind: &str, payload: &str) -> Self {
        Call::RoomCommand {
            room: room.into(),
            kind: kind.into(),
            payload: payload.into(),
        }
    }

    pub fn reply(room: &str, message: &str) -> Self {
        Call::Reply {
            room: room.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }
}

struct RecordingRoom {
    id: RoomId,
    recorder: Recorder,
}

impl ShowdownRoom for RecordingRoom {
    fn send_command(&self, kind: &str, payload: &str) {
        self.recorder
            .push(Call::room_command(self.id.as_str(), kind, payload));
    }

    fn reply(&self, message: &str) {
        self.recorder.push(Call::reply(self.id.as_str(), message));
    }
}

pub struct RecordingSession {
    recorder: Recorder,
}

impl ShowdownSession for RecordingSession {
    fn send_global_command(&self, kind: &str, payload: &str) {
        self.recorder.push(Call::global(kind, payload));
    }

    fn room(&self, id: RoomId) -> Box<dyn ShowdownRoom> {
        Box::new(RecordingRoom {
            id,
            recorder: self.recorder.clone(),
        })
    }

    fn close(&self) {
        self.recorder.push(Call::Close);
    }
}

/// Hands out recording sessions and remembers the credentials it saw.
#[derive(Default)]
pub struct RecordingConnector {
    pub recorder: Recorder,
    pub logins: Mutex<Vec<Credentials>>,
    pub events: Mutex<Option<mpsc::Sender<ClientEvent>>>,
    pub fail: bool,
}

impl RecordingConnector {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn connects(&self) -> usize {
        self.logins.lock().len()
    }
}

impl Connector for RecordingConnector {
    fn connect(&self, credentials: Credentials) -> Result<Connected, showdown_proto::Error> {
        if self.fail {
            return Err(showdown_proto::Error::InvalidUrl {
                url: "ws://unreachable".into(),
                reason: "refused by test".into(),
            });
        }
        self.logins.lock().push(credentials);
        let (tx, rx) = mpsc::channel(16);
        *self.events.lock() = Some(tx);
        Ok(Connected {
            session: Arc::new(RecordingSession {
                recorder: self.recorder.clone(),
            }),
            events: rx,
        })
    }
}
