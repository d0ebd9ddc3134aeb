//! Drives handlers through the registry against recording doubles.

use super::{Context, Registry};
use crate::error::HandlerResult;
use crate::showdown::testing::{Call, RecordingConnector};
use crate::state::{ServerInfo, Session};
use irc_proto::Message;
use tokio::sync::mpsc;

pub(crate) struct Harness {
    pub server: ServerInfo,
    pub session: Session,
    pub connector: RecordingConnector,
    registry: Registry,
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_connector(RecordingConnector::default())
    }

    pub fn with_connector(connector: RecordingConnector) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            server: ServerInfo {
                name: "irc.test".into(),
                network: "Showdown".into(),
                version: "showdown-ircd-test".into(),
                created: "today".into(),
                motd: vec!["Welcome!".into()],
            },
            session: Session::new(),
            connector,
            registry: Registry::new(),
            tx,
            rx,
        }
    }

    /// Parse and dispatch one client line.
    pub async fn line(&mut self, line: &str) -> HandlerResult {
        let msg = Message::parse(line).expect("test line should parse");
        let mut ctx = Context::new(&self.server, &mut self.session, &self.tx, &self.connector);
        self.registry.dispatch(&mut ctx, &msg).await
    }

    /// Everything queued for the client so far.
    pub fn drain(&mut self) -> Vec<Message> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            out.push(msg);
        }
        out
    }

    pub fn drain_lines(&mut self) -> Vec<String> {
        self.drain().iter().map(ToString::to_string).collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.connector.recorder.calls()
    }

    /// Complete registration as `name` and return the welcome burst.
    pub async fn register(&mut self, name: &str) -> Vec<Message> {
        self.line(&format!("NICK {}", name.replace(' ', "_")))
            .await
            .expect("NICK");
        self.line(&format!("USER guest 0 * :{name}"))
            .await
            .expect("USER");
        assert!(self.session.registration.is_registered());
        self.drain()
    }
}
