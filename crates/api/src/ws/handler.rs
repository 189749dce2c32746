use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use simcc_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::authenticate_token;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// `?token=` carried by WebSocket upgrade requests, since browsers cannot
/// set headers on them.
#[derive(Debug, Deserialize)]
pub struct WsTokenQuery {
    pub token: String,
}

/// GET /ws?token=
///
/// Authenticates before upgrading, then registers the connection with
/// `WsManager` so notifications can be pushed to it.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsTokenQuery>,
) -> AppResult<impl IntoResponse> {
    let user = authenticate_token(&state, &query.token).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager, user.user_id)))
}

/// Manage a single notification socket after upgrade.
///
/// Outbound messages flow from the manager channel on a spawned task;
/// inbound frames are only watched for close/pong.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, %user_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
