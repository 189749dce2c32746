//! Notification model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// Kinds of notification a user can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    NewProduction,
    UserFollowed,
    ProductionLiked,
    LattesReminder,
    OrcidReminder,
    NewLogin,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::NewProduction => "NEW_PRODUCTION",
            NotificationType::UserFollowed => "USER_FOLLOWED",
            NotificationType::ProductionLiked => "PRODUCTION_LIKED",
            NotificationType::LattesReminder => "LATTES_REMINDER",
            NotificationType::OrcidReminder => "ORCID_REMINDER",
            NotificationType::NewLogin => "NEW_LOGIN",
        }
    }
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub notification_id: DbId,
    pub user_id: DbId,
    pub sender_id: Option<DbId>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}
