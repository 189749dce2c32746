//! Research group models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `research_groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResearchGroup {
    #[serde(rename = "id")]
    pub group_id: DbId,
    pub name: String,
    pub institution: Option<String>,
    pub first_leader: Option<String>,
    pub first_leader_id: Option<DbId>,
    pub second_leader: Option<String>,
    pub second_leader_id: Option<DbId>,
    pub area: Option<String>,
    pub census: Option<i32>,
    pub start_of_collection: Option<String>,
    pub end_of_collection: Option<String>,
    pub group_identifier: String,
    pub year: Option<i32>,
    pub institution_name: Option<String>,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateResearchGroup {
    pub name: String,
    pub institution: Option<String>,
    pub first_leader: Option<String>,
    pub first_leader_id: Option<DbId>,
    pub second_leader: Option<String>,
    pub second_leader_id: Option<DbId>,
    pub area: Option<String>,
    pub census: Option<i32>,
    pub start_of_collection: Option<String>,
    pub end_of_collection: Option<String>,
    pub group_identifier: String,
    pub year: Option<i32>,
    pub institution_name: Option<String>,
    pub category: Option<String>,
}

/// Partial update addressed by `id`.
#[derive(Debug, Deserialize)]
pub struct UpdateResearchGroup {
    pub id: DbId,
    pub name: Option<String>,
    pub institution: Option<String>,
    pub first_leader: Option<String>,
    pub first_leader_id: Option<DbId>,
    pub second_leader: Option<String>,
    pub second_leader_id: Option<DbId>,
    pub area: Option<String>,
    pub census: Option<i32>,
    pub start_of_collection: Option<String>,
    pub end_of_collection: Option<String>,
    pub group_identifier: Option<String>,
    pub year: Option<i32>,
    pub institution_name: Option<String>,
    pub category: Option<String>,
}
