//! Fake chat server.
//!
//! Accepts one WebSocket session, records every text frame the gateway
//! sends, and pushes frames back on request.

use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;

pub struct FakeShowdown {
    url: String,
    received: mpsc::UnboundedReceiver<String>,
    outgoing: Option<mpsc::UnboundedSender<String>>,
}

impl FakeShowdown {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("ws://{}/showdown/websocket", listener.local_addr()?);
        let (received_tx, received) = mpsc::unbounded_channel();
        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(socket) = tokio_tungstenite::accept_async(stream).await else {
                return;
            };
            let (mut write, mut read) = socket.split();
            loop {
                tokio::select! {
                    frame = outgoing_rx.recv() => match frame {
                        Some(text) => {
                            if write.send(WsMessage::Text(text)).await.is_err() {
                                return;
                            }
                        }
                        None => {
                            let _ = write.send(WsMessage::Close(None)).await;
                            return;
                        }
                    },
                    incoming = read.next() => match incoming {
                        Some(Ok(WsMessage::Text(text))) => {
                            let _ = received_tx.send(text);
                        }
                        Some(Ok(_)) => {}
                        _ => return,
                    },
                }
            }
        });

        Ok(Self {
            url,
            received,
            outgoing: Some(outgoing),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a frame to the gateway.
    pub fn push(&self, frame: &str) {
        if let Some(outgoing) = &self.outgoing {
            let _ = outgoing.send(frame.to_string());
        }
    }

    /// Next frame the gateway sent.
    pub async fn next_frame(&mut self) -> anyhow::Result<String> {
        timeout(Duration::from_secs(5), self.received.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("Remote session ended"))
    }

    /// Close the session from the server side.
    pub fn hang_up(&mut self) {
        self.outgoing = None;
    }
}
