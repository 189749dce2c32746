//! Researcher models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, DepId, Timestamp};

/// A row from the `researchers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Researcher {
    pub researcher_id: DbId,
    pub name: String,
    pub lattes_id: String,
    pub institution_id: Option<DbId>,
    pub ufmg_registration: Option<String>,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateResearcher {
    pub researcher_id: Option<DbId>,
    pub name: String,
    pub lattes_id: String,
    pub institution_id: Option<DbId>,
    pub ufmg_registration: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResearcher {
    pub researcher_id: DbId,
    pub name: Option<String>,
    pub lattes_id: Option<String>,
    pub institution_id: Option<DbId>,
    pub ufmg_registration: Option<String>,
    pub status: Option<bool>,
}

/// Filters for researcher listing.
#[derive(Debug, Default, Deserialize)]
pub struct ResearcherFilter {
    pub institution_id: Option<DbId>,
    /// Case-insensitive name prefix.
    pub name: Option<String>,
    pub lattes_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Link between a department and a researcher.
#[derive(Debug, Clone, Deserialize, Serialize, FromRow)]
pub struct DepartmentResearcher {
    pub dep_id: DepId,
    pub researcher_id: DbId,
}
