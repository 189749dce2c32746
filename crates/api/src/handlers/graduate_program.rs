//! Handlers for the `/graduate-program` resource and its rosters.
//!
//! Roster imports carry the active years as a `;`-separated string
//! (`"2020;2021"`), parsed here before anything is written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use simcc_core::academic::parse_year_list;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::graduate_program::{
    CreateGraduateProgram, GraduateProgram, GraduateProgramFilter, GraduateProgramSummary,
    MemberType, NewProgramResearcher, NewProgramStudent, ProgramResearcher, ProgramStudent,
    UpdateGraduateProgram,
};
use simcc_db::repositories::GraduateProgramRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::query::InstitutionParams;
use crate::response::{CountResponse, DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Roster DTOs
// ---------------------------------------------------------------------------

/// One row of a program researcher import.
#[derive(Debug, Deserialize)]
pub struct ProgramResearcherInput {
    pub graduate_program_id: DbId,
    pub researcher_id: DbId,
    pub type_: MemberType,
    #[serde(default)]
    pub year: String,
}

impl ProgramResearcherInput {
    fn into_new(self) -> Result<NewProgramResearcher, CoreError> {
        Ok(NewProgramResearcher {
            graduate_program_id: self.graduate_program_id,
            researcher_id: self.researcher_id,
            member_type: self.type_,
            years: parse_year_list(&self.year)?,
        })
    }
}

/// One row of a program student import.
#[derive(Debug, Deserialize)]
pub struct ProgramStudentInput {
    pub graduate_program_id: DbId,
    pub lattes_id: String,
    pub name: Option<String>,
    pub institution_id: Option<DbId>,
    #[serde(default)]
    pub year: String,
}

impl ProgramStudentInput {
    fn into_new(self) -> Result<NewProgramStudent, CoreError> {
        if self.lattes_id.trim().is_empty() {
            return Err(CoreError::Validation("lattes_id is required".into()));
        }
        Ok(NewProgramStudent {
            graduate_program_id: self.graduate_program_id,
            years: parse_year_list(&self.year)?,
            lattes_id: self.lattes_id,
            name: self.name,
            institution_id: self.institution_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberTypeParams {
    pub type_: Option<MemberType>,
}

fn researchers_from(
    input: OneOrMany<ProgramResearcherInput>,
) -> Result<Vec<NewProgramResearcher>, CoreError> {
    input.into_vec().into_iter().map(ProgramResearcherInput::into_new).collect()
}

fn students_from(
    input: OneOrMany<ProgramStudentInput>,
) -> Result<Vec<NewProgramStudent>, CoreError> {
    input.into_vec().into_iter().map(ProgramStudentInput::into_new).collect()
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// POST /api/v1/graduate-program
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<CreateGraduateProgram>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<GraduateProgram>>>)> {
    let inputs = input.into_vec();
    if inputs.iter().any(|p| p.code.trim().is_empty() || p.name.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "code and name are required".into(),
        )));
    }
    let created = GraduateProgramRepo::create_many(&state.pool, &inputs).await?;
    tracing::info!(count = created.len(), "Graduate programs created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/graduate-program
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<GraduateProgramFilter>,
) -> AppResult<Json<DataResponse<Vec<GraduateProgramSummary>>>> {
    let rows = GraduateProgramRepo::list_with_counts(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/graduate-program/count
pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<InstitutionParams>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = GraduateProgramRepo::count(&state.pool, params.institution_id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /api/v1/graduate-program/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GraduateProgram>>> {
    let program = GraduateProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("GraduateProgram", id)))?;
    Ok(Json(DataResponse { data: program }))
}

/// PUT /api/v1/graduate-program
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateGraduateProgram>,
) -> AppResult<Json<DataResponse<GraduateProgram>>> {
    let program = GraduateProgramRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found(
                "GraduateProgram",
                input.graduate_program_id,
            ))
        })?;
    Ok(Json(DataResponse { data: program }))
}

/// POST /api/v1/graduate-program/{id}/visibility
pub async fn toggle_visibility(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GraduateProgram>>> {
    let program = GraduateProgramRepo::toggle_visibility(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("GraduateProgram", id)))?;
    tracing::info!(
        graduate_program_id = %id,
        visible = program.visible,
        "Graduate program visibility changed"
    );
    Ok(Json(DataResponse { data: program }))
}

/// DELETE /api/v1/graduate-program/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GraduateProgramRepo::delete(&state.pool, id).await? {
        tracing::info!(graduate_program_id = %id, "Graduate program deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("GraduateProgram", id)))
    }
}

// ---------------------------------------------------------------------------
// Researchers
// ---------------------------------------------------------------------------

/// POST /api/v1/graduate-program/researcher
pub async fn add_researchers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<ProgramResearcherInput>>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let members = researchers_from(input)?;
    GraduateProgramRepo::add_researchers(&state.pool, &members).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} researcher(s) added", members.len()),
        }),
    ))
}

/// GET /api/v1/graduate-program/{id}/researcher
pub async fn list_researchers(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<MemberTypeParams>,
) -> AppResult<Json<DataResponse<Vec<ProgramResearcher>>>> {
    let rows = GraduateProgramRepo::list_researchers(
        &state.pool,
        id,
        params.type_.map(MemberType::as_str),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// PUT /api/v1/graduate-program/researcher
pub async fn update_researchers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<ProgramResearcherInput>>,
) -> AppResult<Json<MessageResponse>> {
    let members = researchers_from(input)?;
    let updated = GraduateProgramRepo::update_researchers(&state.pool, &members).await?;
    Ok(Json(MessageResponse {
        message: format!("{updated} researcher(s) updated"),
    }))
}

/// DELETE /api/v1/graduate-program/{id}/researcher/{researcher_id}
pub async fn remove_researcher(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((id, researcher_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if GraduateProgramRepo::remove_researcher(&state.pool, id, researcher_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Researcher is not part of this program".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// POST /api/v1/graduate-program/student
///
/// Students unknown by `lattes_id` are registered as researchers first.
pub async fn add_students(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<ProgramStudentInput>>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let students = students_from(input)?;
    GraduateProgramRepo::add_students(&state.pool, &students).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} student(s) added", students.len()),
        }),
    ))
}

/// GET /api/v1/graduate-program/{id}/student
pub async fn list_students(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProgramStudent>>>> {
    let rows = GraduateProgramRepo::list_students(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// PUT /api/v1/graduate-program/student
pub async fn update_students(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<ProgramStudentInput>>,
) -> AppResult<Json<MessageResponse>> {
    let students = students_from(input)?;
    let updated = GraduateProgramRepo::update_students(&state.pool, &students).await?;
    Ok(Json(MessageResponse {
        message: format!("{updated} student(s) updated"),
    }))
}

/// DELETE /api/v1/graduate-program/{id}/student/{researcher_id}
pub async fn remove_student(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((id, researcher_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if GraduateProgramRepo::remove_student(&state.pool, id, researcher_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Student is not part of this program".into(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn researcher_input_parses_years_and_type() {
        let input: ProgramResearcherInput = serde_json::from_value(serde_json::json!({
            "graduate_program_id": DbId::nil(),
            "researcher_id": DbId::nil(),
            "type_": "COLABORADOR",
            "year": "2020; 2021"
        }))
        .unwrap();
        let member = input.into_new().unwrap();
        assert_eq!(member.member_type, MemberType::Colaborador);
        assert_eq!(member.years, vec![2020, 2021]);
    }

    #[test]
    fn student_input_rejects_bad_year() {
        let input: ProgramStudentInput = serde_json::from_value(serde_json::json!({
            "graduate_program_id": DbId::nil(),
            "lattes_id": "123",
            "year": "20x0"
        }))
        .unwrap();
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn student_input_requires_lattes_id() {
        let input: ProgramStudentInput = serde_json::from_value(serde_json::json!({
            "graduate_program_id": DbId::nil(),
            "lattes_id": " "
        }))
        .unwrap();
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }
}
