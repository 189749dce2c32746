use std::sync::Arc;

use simcc_db::models::chat::ChatMessage;
use simcc_events::ChatHub;

use crate::config::ServerConfig;
use crate::storage::ImageStore;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: simcc_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Per-user WebSocket registry used for live notifications.
    pub ws_manager: Arc<WsManager>,
    /// Topic hub relaying chat messages between connected peers.
    pub chat_hub: Arc<ChatHub<ChatMessage>>,
}

impl AppState {
    /// Store for uploaded icons and covers, rooted at the configured
    /// upload directory.
    pub fn images(&self) -> ImageStore {
        ImageStore::new(&self.config.upload_dir)
    }
}
