//! Faculty snapshot models.

use serde::Serialize;
use sqlx::FromRow;
use simcc_core::types::{Date, DbId};

/// A row from the `professors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Professor {
    pub professor_id: DbId,
    /// Live researcher whose name matched at import time.
    pub researcher_id: Option<DbId>,
    pub registration_number: String,
    pub ufmg_registration_number: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub work_regime: Option<String>,
    pub job_class: Option<String>,
    pub job_title: Option<String>,
    pub job_rank: Option<String>,
    pub job_reference_code: Option<String>,
    pub academic_degree: Option<String>,
    pub organization_entry_date: Option<Date>,
    pub last_promotion_date: Option<Date>,
    pub semester_reference: String,
}

/// Parsed professor ready for insertion.
#[derive(Debug, Clone)]
pub struct NewProfessor {
    pub registration_number: String,
    pub ufmg_registration_number: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub work_regime: Option<String>,
    pub job_class: Option<String>,
    pub job_title: Option<String>,
    pub job_rank: Option<String>,
    pub job_reference_code: Option<String>,
    pub academic_degree: Option<String>,
    pub organization_entry_date: Option<Date>,
    pub last_promotion_date: Option<Date>,
    pub semester_reference: String,
}
