//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!   socket read ──► IrcCodec ──► Registry::dispatch ──┐
//!                                                     ├──► mpsc ──► writer task ──► socket write
//!   remote session ──► Relay task ────────────────────┘
//! ```
//!
//! Commands are handled strictly one after another. The writer task is the
//! only owner of the write half, so lines from the command loop and the
//! relay reach the client whole and in queue order.

use crate::config::LimitsConfig;
use crate::error::HandlerError;
use crate::handlers::{Context, Registry};
use crate::relay::Relay;
use crate::showdown::Connector;
use crate::state::{ServerInfo, Session};
use futures_util::{SinkExt, StreamExt};
use irc_proto::{CodecError, IrcCodec, Message, Prefix, Response};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, instrument, warn};

/// A client connection handler.
pub struct Connection {
    addr: SocketAddr,
    stream: TcpStream,
    server: Arc<ServerInfo>,
    registry: Arc<Registry>,
    connector: Arc<dyn Connector>,
    registration_timeout: Duration,
    outbound_queue: usize,
}

impl Connection {
    /// Create a new connection handler.
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        server: Arc<ServerInfo>,
        registry: Arc<Registry>,
        connector: Arc<dyn Connector>,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            addr,
            stream,
            server,
            registry,
            connector,
            registration_timeout: limits.registration_timeout(),
            outbound_queue: limits.outbound_queue,
        }
    }

    /// Run the connection until the client quits, hangs up, or the remote
    /// session ends.
    #[instrument(skip(self), fields(addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        info!(server = %self.server.name, "Client connected");

        let (read_half, write_half) = self.stream.into_split();
        let mut reader = FramedRead::new(read_half, IrcCodec::new());
        let (tx, rx) = mpsc::channel::<Message>(self.outbound_queue);
        let writer = tokio::spawn(write_loop(FramedWrite::new(write_half, IrcCodec::new()), rx));

        let cancel = CancellationToken::new();
        let mut session = Session::new();
        let deadline = tokio::time::sleep(self.registration_timeout);
        tokio::pin!(deadline);

        let result = loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Remote session ended");
                    break Ok(());
                }
                _ = &mut deadline, if !session.registration.is_registered() => {
                    warn!("Registration timed out");
                    let _ = tx.send(Message::error("Closing Link: Registration timeout")).await;
                    break Ok(());
                }
                next = reader.next() => next,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(CodecError::LineTooLong)) => {
                    warn!("Input line too long");
                    let reply = Response::err_inputtoolong(&session.client_nick())
                        .with_prefix(Prefix::ServerName(self.server.name.clone()));
                    let _ = tx.send(reply).await;
                    let _ = tx.send(Message::error("Closing Link: Input line too long")).await;
                    break Ok(());
                }
                Some(Err(CodecError::Io(e))) => break Err(e.into()),
                None => {
                    debug!("Client hung up");
                    break Ok(());
                }
            };

            debug!(raw = %msg, "Received message");
            let mut ctx = Context::new(&self.server, &mut session, &tx, self.connector.as_ref());
            let dispatched = self.registry.dispatch(&mut ctx, &msg).await;

            if let Some(events) = session.take_events() {
                let relay = Relay::new(
                    &self.server.name,
                    &session.login.nickname,
                    session.nickname.clone(),
                );
                tokio::spawn(relay.run(events, tx.clone(), cancel.clone()).in_current_span());
            }

            match dispatched {
                Ok(()) => {}
                Err(HandlerError::Quit(reason)) => {
                    let text = match reason {
                        Some(reason) => format!("Closing Link: {} (Quit: {reason})", session.client_nick()),
                        None => format!("Closing Link: {} (Client Quit)", session.client_nick()),
                    };
                    let _ = tx.send(Message::error(&text)).await;
                    break Ok(());
                }
                Err(HandlerError::Remote(_)) => break Ok(()),
                Err(e) => break Err(e.into()),
            }
        };

        session.close();
        cancel.cancel();
        drop(tx);
        if let Err(e) = writer.await {
            warn!(error = %e, "Writer task failed");
        }
        info!(nick = %session.client_nick(), "Client disconnected");
        result
    }
}

/// Drain the outbound queue into the socket until every sender is gone.
async fn write_loop(
    mut sink: FramedWrite<OwnedWriteHalf, IrcCodec>,
    mut rx: mpsc::Receiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if let Err(e) = sink.send(msg).await {
            debug!(error = %e, "Write failed");
            break;
        }
    }
}
