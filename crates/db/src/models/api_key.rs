//! Personal API key model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `api_keys` table. The hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiKey {
    pub key_id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub key_prefix: String,
    #[serde(skip_serializing)]
    pub key_hash: String,
    pub created_at: Timestamp,
}

/// DTO for requesting a new key.
#[derive(Debug, Deserialize)]
pub struct CreateApiKey {
    pub name: String,
}
