//! Star (bookmark) model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `stars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Star {
    pub user_id: DbId,
    pub entry_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entry_type: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateStar {
    pub entry_id: DbId,
    #[serde(rename = "type")]
    pub entry_type: String,
}
