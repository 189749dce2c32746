//! Chat, participant and message models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `chats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chat {
    pub chat_id: DbId,
    pub chat_name: String,
    pub is_group: bool,
    pub created_at: Timestamp,
}

/// A chat with its participant ids.
#[derive(Debug, Clone, Serialize)]
pub struct ChatWithUsers {
    #[serde(flatten)]
    pub chat: Chat,
    pub users: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChat {
    #[serde(default)]
    pub chat_name: String,
    #[serde(default)]
    pub is_group: bool,
    pub users: Vec<DbId>,
}

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: DbId,
    pub chat_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub content: String,
}
