//! Handlers for the `/professor` resource.
//!
//! Faculty are imported per semester from the HR export, like technicians,
//! but an import replaces the whole semester.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use simcc_core::academic::{parse_optional_br_date, semester_reference};
use simcc_core::error::CoreError;
use simcc_db::models::department::SemesterRef;
use simcc_db::models::professor::{NewProfessor, Professor};
use simcc_db::repositories::ProfessorRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::technician::SemesterParams;
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the HR faculty export.
#[derive(Debug, Deserialize)]
pub struct ProfessorImport {
    pub matric: String,
    #[serde(rename = "inscUFMG")]
    pub insc_ufmg: Option<String>,
    pub nome: String,
    pub genero: Option<String>,
    pub situacao: Option<String>,
    pub rt: Option<String>,
    pub clas: Option<String>,
    pub cargo: Option<String>,
    pub classe: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub titulacao: Option<String>,
    #[serde(rename = "entradaNaUFMG")]
    pub entrada_na_ufmg: Option<String>,
    pub progressao: Option<String>,
    pub year_charge: String,
    pub semester: String,
}

impl TryFrom<ProfessorImport> for NewProfessor {
    type Error = CoreError;

    fn try_from(p: ProfessorImport) -> Result<Self, Self::Error> {
        if p.matric.trim().is_empty() || p.nome.trim().is_empty() {
            return Err(CoreError::Validation("matric and nome are required".into()));
        }
        Ok(NewProfessor {
            organization_entry_date: parse_optional_br_date(p.entrada_na_ufmg.as_deref())?,
            last_promotion_date: parse_optional_br_date(p.progressao.as_deref())?,
            semester_reference: semester_reference(&p.year_charge, &p.semester),
            registration_number: p.matric,
            ufmg_registration_number: p.insc_ufmg,
            full_name: p.nome,
            gender: p.genero,
            status: p.situacao,
            work_regime: p.rt,
            job_class: p.clas,
            job_title: p.cargo,
            job_rank: p.classe,
            job_reference_code: p.reference,
            academic_degree: p.titulacao,
        })
    }
}

/// The single semester shared by every row of an import.
fn import_semester(rows: &[NewProfessor]) -> Result<&str, CoreError> {
    let first = rows
        .first()
        .ok_or_else(|| CoreError::Validation("at least one professor is required".into()))?;
    if rows
        .iter()
        .any(|p| p.semester_reference != first.semester_reference)
    {
        return Err(CoreError::Validation(
            "all professors must belong to the same semester".into(),
        ));
    }
    Ok(&first.semester_reference)
}

/// POST /api/v1/professor
///
/// Replaces the snapshot of the imported semester.
pub async fn import(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<ProfessorImport>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Professor>>>)> {
    let rows = input
        .into_vec()
        .into_iter()
        .map(NewProfessor::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let semester = import_semester(&rows)?;
    let saved = ProfessorRepo::replace_semester(&state.pool, semester, &rows).await?;
    tracing::info!(
        semester,
        count = saved.len(),
        linked = saved.iter().filter(|p| p.researcher_id.is_some()).count(),
        "Professors imported"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/v1/professor
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SemesterParams>,
) -> AppResult<Json<DataResponse<Vec<Professor>>>> {
    let reference = params.reference()?;
    let rows = ProfessorRepo::list(&state.pool, reference.as_deref()).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/professor/semester
pub async fn semesters(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SemesterRef>>>> {
    let rows = ProfessorRepo::semesters(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}
