// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// WebSocket test client speaking the `{event, data}` envelope
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::text(text.to_string())).await?;
        Ok(())
    }

    pub async fn send_event(
        &mut self,
        event: &str,
        data: Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frame = json!({ "event": event, "data": data });
        self.send_raw(&frame.to_string()).await
    }

    pub async fn join_game(&mut self, game_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.send_event("joinGame", json!({ "gameId": game_id })).await
    }

    pub async fn ready(
        &mut self,
        game_id: &str,
        side: &str,
        is_ready: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.send_event(
            "readyState",
            json!({ "gameId": game_id, "side": side, "isReady": is_ready }),
        )
        .await
    }

    /// Next JSON text frame; control frames are skipped.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let next = tokio::time::timeout(remaining, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(text.as_str())?),
                Some(Ok(Message::Close(_))) | None => return Err("connection closed".into()),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(Box::new(e)),
            }
        }
    }

    /// Skip frames until one with the given event name arrives.
    pub async fn wait_for(&mut self, event: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let frame = self
                .recv_json_timeout(remaining)
                .await
                .map_err(|e| format!("waiting for {event}: {e}"))?;
            if frame["event"] == event {
                return Ok(frame["data"].clone());
            }
        }
    }

    /// Collect every frame that arrives within `window`.
    pub async fn drain(&mut self, window: Duration) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.recv_json_timeout(window).await {
            frames.push(frame);
        }
        frames
    }

    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }
}
