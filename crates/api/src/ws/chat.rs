//! Live chat relay between two users.
//!
//! Each connection runs two loops: inbound frames are persisted and
//! published on the chat topic, while a spawned task forwards the peer's
//! messages from the hub back to the socket.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use simcc_core::chat::chat_topic;
use simcc_core::types::DbId;
use simcc_db::repositories::ChatRepo;
use tokio::sync::broadcast::error::RecvError;

use crate::error::AppResult;
use crate::handlers::chat::private_chat;
use crate::middleware::auth::authenticate_token;
use crate::state::AppState;
use crate::ws::handler::WsTokenQuery;

const CONNECTED_FRAME: &str = r#"{"status":"connected"}"#;

/// Inbound frames may be plain text or `{"content": "..."}`.
#[derive(Debug, Deserialize)]
struct InboundMessage {
    content: String,
}

/// GET /ws/chat/user/{user_id}?token=
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(peer_id): Path<DbId>,
    Query(query): Query<WsTokenQuery>,
) -> AppResult<impl IntoResponse> {
    let user = authenticate_token(&state, &query.token).await?;
    let chat = private_chat(&state, user.user_id, peer_id, None).await?;
    Ok(ws.on_upgrade(move |socket| relay(socket, state, user.user_id, chat.chat_id)))
}

async fn relay(socket: WebSocket, state: AppState, me: DbId, chat_id: DbId) {
    let topic = chat_topic(chat_id);
    let mut rx = state.chat_hub.subscribe(&topic).await;
    let (mut sink, mut stream) = socket.split();

    if sink.send(Message::Text(CONNECTED_FRAME.into())).await.is_err() {
        return;
    }
    tracing::info!(%chat_id, user_id = %me, "Chat relay connected");

    let forward_topic = topic.clone();
    let forward = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) if msg.sender_id == me => {}
                Ok(msg) => {
                    let text = match serde_json::to_string(&msg) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize chat message");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = %forward_topic, skipped, "Chat receiver lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let content = match serde_json::from_str::<InboundMessage>(text.as_str()) {
                    Ok(inbound) => inbound.content,
                    Err(_) => text.as_str().to_string(),
                };
                if content.trim().is_empty() {
                    continue;
                }
                match ChatRepo::insert_message(&state.pool, chat_id, me, &content).await {
                    Ok(msg) => {
                        state.chat_hub.publish(&topic, msg).await;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, %chat_id, "Failed to store chat message");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, %chat_id, "Chat socket receive error");
                break;
            }
        }
    }

    forward.abort();
    tracing::info!(%chat_id, user_id = %me, "Chat relay disconnected");
}
