//! Department and discipline models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, DepId, Timestamp};

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub dep_id: DepId,
    pub org_cod: Option<String>,
    pub dep_nom: String,
    pub dep_des: Option<String>,
    pub dep_email: Option<String>,
    pub dep_site: Option<String>,
    pub dep_sigla: Option<String>,
    pub dep_tel: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepartment {
    pub dep_id: DepId,
    pub org_cod: Option<String>,
    pub dep_nom: String,
    pub dep_des: Option<String>,
    pub dep_email: Option<String>,
    pub dep_site: Option<String>,
    pub dep_sigla: Option<String>,
    pub dep_tel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDepartment {
    pub org_cod: Option<String>,
    pub dep_nom: Option<String>,
    pub dep_des: Option<String>,
    pub dep_email: Option<String>,
    pub dep_site: Option<String>,
    pub dep_sigla: Option<String>,
    pub dep_tel: Option<String>,
}

/// A row from the `disciplines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Discipline {
    pub discipline_id: DbId,
    pub dep_id: DepId,
    pub semester: String,
    pub department: Option<String>,
    pub academic_activity_code: Option<String>,
    pub academic_activity_name: Option<String>,
    pub academic_activity_ch: Option<String>,
    pub demanding_courses: Option<String>,
    pub oft: Option<String>,
    #[serde(rename = "id")]
    pub offering_id: Option<String>,
    pub available_slots: Option<String>,
    pub occupied_slots: Option<String>,
    pub percent_occupied_slots: Option<String>,
    pub schedule: Option<String>,
    pub language: Option<String>,
    /// One slot per professor; `None` where no researcher matched.
    pub researcher_ids: Vec<Option<DbId>>,
    pub researcher_names: Vec<String>,
    pub workloads: Vec<String>,
    pub status: Option<String>,
}

/// Parsed discipline ready for insertion.
#[derive(Debug, Clone)]
pub struct NewDiscipline {
    pub dep_id: DepId,
    pub semester: String,
    pub department: Option<String>,
    pub academic_activity_code: Option<String>,
    pub academic_activity_name: Option<String>,
    pub academic_activity_ch: Option<String>,
    pub demanding_courses: Option<String>,
    pub oft: Option<String>,
    pub offering_id: Option<String>,
    pub available_slots: Option<String>,
    pub occupied_slots: Option<String>,
    pub percent_occupied_slots: Option<String>,
    pub schedule: Option<String>,
    pub language: Option<String>,
    pub professors: Vec<simcc_core::academic::Professor>,
    pub status: Option<String>,
}

/// A distinct academic term, split into its parts.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct SemesterRef {
    pub year: String,
    pub semester: String,
}
