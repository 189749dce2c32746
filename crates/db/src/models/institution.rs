//! Institution models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `institutions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Institution {
    pub institution_id: DbId,
    pub name: String,
    pub acronym: Option<String>,
    pub lattes_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An institution with aggregate counts of what is attached to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InstitutionStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub institution: Institution,
    /// Researchers.
    pub count_r: i64,
    /// Graduate programs.
    pub count_gp: i64,
    /// Graduate program researchers.
    pub count_gpr: i64,
    /// Graduate program students.
    pub count_gps: i64,
    /// Departments with at least one researcher of the institution.
    pub count_d: i64,
    /// Technicians attached to those departments.
    pub count_t: i64,
}

/// DTO for creating an institution. The id may be supplied by an importer.
#[derive(Debug, Deserialize)]
pub struct CreateInstitution {
    pub institution_id: Option<DbId>,
    pub name: String,
    pub acronym: Option<String>,
    pub lattes_id: Option<String>,
}

/// DTO for updating an institution. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateInstitution {
    pub institution_id: DbId,
    pub name: Option<String>,
    pub acronym: Option<String>,
    pub lattes_id: Option<String>,
}
