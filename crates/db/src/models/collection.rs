//! Collection and collection entry models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `collections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub collection_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visible: Option<bool>,
}

/// A row from the `collection_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollectionEntry {
    pub collection_id: DbId,
    pub entry_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entry_type: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollectionEntry {
    pub entry_id: DbId,
    #[serde(rename = "type")]
    pub entry_type: String,
}
