//! Technician models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{Date, DbId, DepId};

/// A row from the `technicians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Technician {
    pub technician_id: DbId,
    pub registration_number: String,
    pub ufmg_registration_number: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub status_code: Option<String>,
    pub work_regime: Option<String>,
    pub job_class: Option<String>,
    pub job_title: Option<String>,
    pub job_rank: Option<String>,
    pub job_reference_code: Option<String>,
    pub academic_degree: Option<String>,
    pub department_name: Option<String>,
    pub academic_unit: Option<String>,
    pub organization_entry_date: Option<Date>,
    pub last_promotion_date: Option<Date>,
    pub semester_reference: String,
}

/// Parsed technician ready for insertion.
#[derive(Debug, Clone)]
pub struct NewTechnician {
    pub registration_number: String,
    pub ufmg_registration_number: Option<String>,
    pub full_name: String,
    pub gender: Option<String>,
    pub status_code: Option<String>,
    pub work_regime: Option<String>,
    pub job_class: Option<String>,
    pub job_title: Option<String>,
    pub job_rank: Option<String>,
    pub job_reference_code: Option<String>,
    pub academic_degree: Option<String>,
    pub department_name: Option<String>,
    pub academic_unit: Option<String>,
    pub organization_entry_date: Option<Date>,
    pub last_promotion_date: Option<Date>,
    pub semester_reference: String,
}

/// A row from the `technician_roles` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TechnicianRole {
    pub technician_id: DbId,
    pub role: String,
}

/// Link between a department and a technician.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DepartmentTechnician {
    pub dep_id: DepId,
    pub technician_id: DbId,
}
