//! Tag and knowledge-area catalogs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub tag_id: DbId,
    pub name: String,
    pub color_code: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub color_code: String,
}

/// Partial update addressed by `tag_id`.
#[derive(Debug, Deserialize)]
pub struct UpdateTag {
    pub tag_id: DbId,
    pub name: Option<String>,
    pub color_code: Option<String>,
}

/// A row from the `areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Area {
    pub area_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateArea {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArea {
    pub area_id: DbId,
    pub name: String,
}
