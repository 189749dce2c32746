use std::sync::Arc;
use std::time::Duration;

use simcc_db::models::chat::ChatMessage;
use simcc_events::ChatHub;
use tokio_util::sync::CancellationToken;

use crate::ws::manager::WsManager;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn the heartbeat task.
///
/// Every tick pings all `/ws` clients and drops chat topics nobody listens
/// to anymore. Runs until `cancel` fires.
pub fn start_heartbeat(
    ws_manager: Arc<WsManager>,
    chat_hub: Arc<ChatHub<ChatMessage>>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Heartbeat stopped");
                    break;
                }
                _ = interval.tick() => {
                    let count = ws_manager.connection_count().await;
                    tracing::debug!(count, "WebSocket heartbeat ping");
                    ws_manager.ping_all().await;
                    chat_hub.prune().await;
                }
            }
        }
    })
}
