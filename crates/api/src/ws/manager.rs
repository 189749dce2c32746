use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use serde::Serialize;
use simcc_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// A single authenticated WebSocket connection.
pub struct WsConnection {
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Registry of live `/ws` connections, keyed by connection id.
///
/// A user may hold several connections (one per tab); pushes fan out to
/// all of them. Shared via `Arc`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection for `user_id`.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String, user_id: DbId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Connection ids held by `user_id`.
    pub async fn get_by_user(&self, user_id: DbId) -> Vec<String> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, conn)| conn.user_id == user_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Send a message to all connections belonging to `user_id`.
    ///
    /// Returns the number of connections the message was queued on. Closed
    /// channels are skipped; their connections clean up on disconnect.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        conns
            .values()
            .filter(|conn| conn.user_id == user_id)
            .filter(|conn| conn.sender.send(message.clone()).is_ok())
            .count()
    }

    /// Serialize `payload` as a text frame and push it to `user_id`.
    pub async fn send_json_to_user<T: Serialize>(&self, user_id: DbId, payload: &T) -> usize {
        match serde_json::to_string(payload) {
            Ok(text) => self.send_to_user(user_id, Message::Text(text.into())).await,
            Err(e) => {
                tracing::error!(error = %e, %user_id, "Failed to serialize WebSocket payload");
                0
            }
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
