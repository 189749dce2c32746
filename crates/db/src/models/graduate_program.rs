//! Graduate program models, roster rows and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{Date, DbId, Timestamp};

/// A row from the `graduate_programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GraduateProgram {
    pub graduate_program_id: DbId,
    pub code: String,
    pub name: String,
    pub name_en: Option<String>,
    pub basic_area: Option<String>,
    pub cooperation_project: Option<String>,
    pub area: String,
    pub modality: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub rating: Option<String>,
    pub institution_id: DbId,
    pub state: String,
    pub city: String,
    pub region: String,
    pub url_image: Option<String>,
    pub acronym: Option<String>,
    pub description: Option<String>,
    pub visible: bool,
    pub site: Option<String>,
    pub coordinator: Option<String>,
    pub email: Option<String>,
    pub start: Option<Date>,
    pub phone: Option<String>,
    pub periodicity: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A program with roster counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GraduateProgramSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub program: GraduateProgram,
    pub qtd_permanente: i64,
    pub qtd_colaborador: i64,
    pub qtd_discente: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateGraduateProgram {
    pub graduate_program_id: Option<DbId>,
    pub code: String,
    pub name: String,
    pub name_en: Option<String>,
    pub basic_area: Option<String>,
    pub cooperation_project: Option<String>,
    pub area: String,
    pub modality: String,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub rating: Option<String>,
    pub institution_id: DbId,
    pub state: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub url_image: Option<String>,
    pub acronym: Option<String>,
    pub description: Option<String>,
    pub visible: Option<bool>,
    pub site: Option<String>,
    pub coordinator: Option<String>,
    pub email: Option<String>,
    pub start: Option<Date>,
    pub phone: Option<String>,
    pub periodicity: Option<String>,
}

/// DTO for fixing program fields. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateGraduateProgram {
    pub graduate_program_id: DbId,
    pub code: Option<String>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub basic_area: Option<String>,
    pub cooperation_project: Option<String>,
    pub area: Option<String>,
    pub modality: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub rating: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub url_image: Option<String>,
    pub acronym: Option<String>,
    pub description: Option<String>,
    pub site: Option<String>,
    pub coordinator: Option<String>,
    pub email: Option<String>,
    pub start: Option<Date>,
    pub phone: Option<String>,
    pub periodicity: Option<String>,
}

/// Filters for program listing.
#[derive(Debug, Default, Deserialize)]
pub struct GraduateProgramFilter {
    pub institution_id: Option<DbId>,
    pub graduate_program_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// Membership kind of a program researcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberType {
    Permanente,
    Colaborador,
}

impl MemberType {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberType::Permanente => "PERMANENTE",
            MemberType::Colaborador => "COLABORADOR",
        }
    }
}

/// A researcher on a program roster, joined with the researcher's identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramResearcher {
    pub graduate_program_id: DbId,
    pub researcher_id: DbId,
    pub name: String,
    pub lattes_id: String,
    pub type_: String,
    pub years: Vec<i32>,
}

/// A student on a program roster.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramStudent {
    pub graduate_program_id: DbId,
    pub researcher_id: DbId,
    pub name: String,
    pub lattes_id: String,
    pub years: Vec<i32>,
}

/// Parsed input for a roster researcher.
#[derive(Debug, Clone)]
pub struct NewProgramResearcher {
    pub graduate_program_id: DbId,
    pub researcher_id: DbId,
    pub member_type: MemberType,
    pub years: Vec<i32>,
}

/// Parsed input for a roster student. The researcher is resolved by Lattes
/// id and created from `name` and `institution_id` when unknown.
#[derive(Debug, Clone)]
pub struct NewProgramStudent {
    pub graduate_program_id: DbId,
    pub lattes_id: String,
    pub name: Option<String>,
    pub institution_id: Option<DbId>,
    pub years: Vec<i32>,
}
