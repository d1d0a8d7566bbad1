//! WebSocket fan-out server.
//!
//! Accepts any number of subscriber connections and pushes each
//! appended log suffix to all of them. Delivery is decoupled from the
//! poll path through a broadcast channel of pre-serialized frames:
//! publishing never blocks, and a subscriber too slow to keep up lags
//! and loses frames instead of stalling anyone else.

use crate::error::FanoutResult;
use console_protocol::{FanoutMessage, LogEntry};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Frames buffered per subscriber before a slow one starts losing them.
const BROADCAST_CAPACITY: usize = 256;

/// Handle to the fan-out server. Cheap to clone; all clones publish to
/// the same subscribers.
#[derive(Clone)]
pub struct FanoutServer {
    frames: broadcast::Sender<String>,
}

impl Default for FanoutServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FanoutServer {
    /// Creates a server that is not yet listening.
    pub fn new() -> Self {
        let (frames, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { frames }
    }

    /// Binds the listener and spawns the accept loop.
    ///
    /// Returns the bound address (useful with port 0).
    pub async fn start(&self, addr: SocketAddr) -> FanoutResult<SocketAddr> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "fan-out server listening");

        let frames = self.frames.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        debug!(%peer, "subscriber connecting");
                        let rx = frames.subscribe();
                        tokio::spawn(async move {
                            if let Err(err) = handle_subscriber(stream, peer, rx).await {
                                debug!(%peer, error = %err, "subscriber connection ended");
                            }
                        });
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to accept subscriber");
                    }
                }
            }
        });
        Ok(local_addr)
    }

    /// Broadcasts an appended suffix to every connected subscriber.
    ///
    /// Empty suffixes are skipped — subscribers only ever see genuine
    /// forward growth. Never blocks; with no subscribers the frame is
    /// simply dropped.
    pub fn broadcast_update(&self, appended: &[LogEntry]) {
        if appended.is_empty() {
            return;
        }
        let frame = FanoutMessage::ConsoleUpdate {
            data: appended.to_vec(),
        };
        match serde_json::to_string(&frame) {
            Ok(text) => {
                // send only errors when there are no receivers.
                let _ = self.frames.send(text);
            }
            Err(err) => warn!(error = %err, "failed to serialize console update"),
        }
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.frames.receiver_count()
    }
}

/// Per-subscriber task: forwards broadcast frames to the socket and
/// drains (but otherwise ignores) anything the subscriber sends.
async fn handle_subscriber(
    stream: TcpStream,
    peer: SocketAddr,
    mut rx: broadcast::Receiver<String>,
) -> FanoutResult<()> {
    let ws = accept_async(stream).await?;
    let (mut write, mut read) = ws.split();
    info!(%peer, "subscriber connected");

    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Ok(text) => {
                    if write.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(%peer, skipped, "slow subscriber lost frames");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    debug!(%peer, message = %text, "subscriber message");
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    debug!(%peer, error = %err, "subscriber read failed");
                    break;
                }
            },
        }
    }

    info!(%peer, "subscriber disconnected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_tungstenite::connect_async;

    fn entry(id: i64, time: f64, text: &str) -> LogEntry {
        LogEntry {
            id,
            time,
            text: text.to_string(),
            decorated_text: text.to_string(),
            client_note: None,
        }
    }

    async fn started_server() -> (FanoutServer, SocketAddr) {
        let server = FanoutServer::new();
        let addr = server
            .start("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        (server, addr)
    }

    #[tokio::test]
    async fn subscriber_receives_console_update_frames() {
        let (server, addr) = started_server().await;
        let (mut ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();

        // Give the subscriber task a moment to register its receiver.
        while server.subscriber_count() == 0 {
            tokio::task::yield_now().await;
        }

        server.broadcast_update(&[entry(1, 2.0, "hello")]);

        let frame = ws.next().await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(json["type"], "console_update");
        assert_eq!(json["data"][0]["text"], "hello");
        assert_eq!(json["data"][0]["log_id"], 1);
    }

    #[tokio::test]
    async fn empty_suffix_is_not_broadcast() {
        let (server, addr) = started_server().await;
        let (mut ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        while server.subscriber_count() == 0 {
            tokio::task::yield_now().await;
        }

        server.broadcast_update(&[]);
        server.broadcast_update(&[entry(1, 1.0, "real")]);

        // The first frame to arrive must be the non-empty update.
        let frame = ws.next().await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();
        assert_eq!(json["data"][0]["text"], "real");
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let (server, addr) = started_server().await;
        let (mut ws_a, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        let (mut ws_b, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        while server.subscriber_count() < 2 {
            tokio::task::yield_now().await;
        }

        server.broadcast_update(&[entry(1, 1.0, "both")]);

        for ws in [&mut ws_a, &mut ws_b] {
            let frame = ws.next().await.unwrap().unwrap();
            assert!(frame.to_text().unwrap().contains("both"));
        }
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_harmless() {
        let (server, _addr) = started_server().await;
        server.broadcast_update(&[entry(1, 1.0, "nobody")]);
        assert_eq!(server.subscriber_count(), 0);
    }
}
