//! Handlers for `/chat`: chats and private messages over HTTP.
//!
//! The live counterpart is the `/ws/chat/user/{user_id}` relay, which shares
//! [`private_chat`] and publishes to the same hub topic.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::chat::{chat_topic, default_chat_name};
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::chat::{Chat, ChatMessage, ChatWithUsers, CreateChat, CreateMessage};
use simcc_db::repositories::{ChatRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Find the private chat between `me` and `peer`, creating it on first use.
///
/// `chat_name` only applies when the chat is created; an empty name falls
/// back to both usernames.
pub(crate) async fn private_chat(
    state: &AppState,
    me: DbId,
    peer: DbId,
    chat_name: Option<&str>,
) -> AppResult<Chat> {
    if me == peer {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot open a private chat with yourself".into(),
        )));
    }
    UserRepo::find_by_id(&state.pool, peer)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", peer)))?;

    if let Some(chat) = ChatRepo::find_private(&state.pool, me, peer).await? {
        return Ok(chat);
    }

    let name = match chat_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_chat_name(&UserRepo::usernames(&state.pool, &[me, peer]).await?),
    };
    let (chat, created) = ChatRepo::find_or_create_private(&state.pool, &name, me, peer).await?;
    if created {
        tracing::info!(chat_id = %chat.chat_id, user_id = %me, %peer, "Private chat created");
    }
    Ok(chat)
}

/// POST /api/v1/chat
///
/// The caller is always added as a participant. A non-group chat between
/// two users that already exists is returned instead of duplicated, keeping
/// its original name.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateChat>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatWithUsers>>)> {
    let mut participants = vec![auth.user_id];
    for user_id in input.users {
        if !participants.contains(&user_id) {
            participants.push(user_id);
        }
    }

    if !input.is_group && participants.len() != 2 {
        return Err(AppError::Core(CoreError::Validation(
            "A private chat needs exactly one other participant".into(),
        )));
    }

    let chat = if input.is_group {
        let name = if input.chat_name.trim().is_empty() {
            default_chat_name(&UserRepo::usernames(&state.pool, &participants).await?)
        } else {
            input.chat_name.trim().to_string()
        };
        ChatRepo::create_group(&state.pool, &name, auth.user_id, &participants).await?
    } else {
        private_chat(&state, auth.user_id, participants[1], Some(&input.chat_name)).await?
    };

    let users = ChatRepo::participants(&state.pool, chat.chat_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ChatWithUsers { chat, users },
        }),
    ))
}

/// GET /api/v1/chat
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ChatWithUsers>>>> {
    let chats = ChatRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: chats }))
}

/// POST /api/v1/chat/user/{user_id}
pub async fn send_private(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(peer): Path<DbId>,
    Json(input): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatMessage>>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "content must not be empty".into(),
        )));
    }
    let chat = private_chat(&state, auth.user_id, peer, None).await?;
    let message =
        ChatRepo::insert_message(&state.pool, chat.chat_id, auth.user_id, &input.content).await?;
    let receivers = state
        .chat_hub
        .publish(&chat_topic(chat.chat_id), message.clone())
        .await;
    tracing::debug!(chat_id = %chat.chat_id, receivers, "Chat message sent");
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/chat/user/{user_id}
///
/// Messages of the private chat with `user_id`, oldest first. Empty when the
/// two users never talked.
pub async fn private_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(peer): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChatMessage>>>> {
    let messages = match ChatRepo::find_private(&state.pool, auth.user_id, peer).await? {
        Some(chat) => ChatRepo::messages(&state.pool, chat.chat_id).await?,
        None => Vec::new(),
    };
    Ok(Json(DataResponse { data: messages }))
}
