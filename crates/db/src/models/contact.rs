//! Newsletter subscriptions and visitor feedback.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsletterSubscriber {
    pub email: String,
    pub subscribed_at: Timestamp,
}

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub feedback_id: DbId,
    pub name: String,
    pub email: String,
    pub rating: i16,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub name: String,
    pub email: String,
    pub rating: i16,
    pub description: Option<String>,
}
