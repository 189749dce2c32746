//! Handlers for the `/department` resource, its researcher links and the
//! discipline offerings imported from the registrar.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use simcc_core::academic::{normalize_semester, parse_professors};
use simcc_core::error::CoreError;
use simcc_core::types::{DbId, DepId};
use simcc_db::models::department::{
    CreateDepartment, Department, Discipline, NewDiscipline, SemesterRef, UpdateDepartment,
};
use simcc_db::models::researcher::{DepartmentResearcher, Researcher};
use simcc_db::repositories::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentParams {
    pub dep_id: Option<DepId>,
}

/// One discipline offering as exported by the registrar.
///
/// `professor` is the flattened `name,id,responsibility` column and
/// `semester` may use either `2024/1` or `2024.1`.
#[derive(Debug, Deserialize)]
pub struct DisciplineInput {
    pub dep_id: DepId,
    pub semester: String,
    pub department: Option<String>,
    pub academic_activity_code: Option<String>,
    pub academic_activity_name: Option<String>,
    pub academic_activity_ch: Option<String>,
    pub demanding_courses: Option<String>,
    pub oft: Option<String>,
    pub id: Option<String>,
    pub available_slots: Option<String>,
    pub occupied_slots: Option<String>,
    pub percent_occupied_slots: Option<String>,
    pub schedule: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub professor: String,
    pub status: Option<String>,
}

impl From<DisciplineInput> for NewDiscipline {
    fn from(d: DisciplineInput) -> Self {
        NewDiscipline {
            dep_id: d.dep_id,
            semester: normalize_semester(&d.semester),
            department: d.department,
            academic_activity_code: d.academic_activity_code,
            academic_activity_name: d.academic_activity_name,
            academic_activity_ch: d.academic_activity_ch,
            demanding_courses: d.demanding_courses,
            oft: d.oft,
            offering_id: d.id,
            available_slots: d.available_slots,
            occupied_slots: d.occupied_slots,
            percent_occupied_slots: d.percent_occupied_slots,
            schedule: d.schedule,
            language: d.language,
            professors: parse_professors(&d.professor),
            status: d.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// POST /api/v1/department
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DataResponse<Department>>)> {
    if input.dep_nom.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "dep_nom must not be empty".into(),
        )));
    }
    let department = DepartmentRepo::create(&state.pool, &input).await?;
    tracing::info!(dep_id = department.dep_id, "Department created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: department })))
}

/// GET /api/v1/department
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DepartmentParams>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let rows = DepartmentRepo::list(&state.pool, params.dep_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/department/{dep_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(dep_id): Path<DepId>,
) -> AppResult<Json<DataResponse<Department>>> {
    let department = DepartmentRepo::find_by_id(&state.pool, dep_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Department", dep_id)))?;
    Ok(Json(DataResponse { data: department }))
}

/// PUT /api/v1/department/{dep_id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(dep_id): Path<DepId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DataResponse<Department>>> {
    let department = DepartmentRepo::update(&state.pool, dep_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Department", dep_id)))?;
    Ok(Json(DataResponse { data: department }))
}

/// DELETE /api/v1/department/{dep_id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(dep_id): Path<DepId>,
) -> AppResult<StatusCode> {
    if DepartmentRepo::delete(&state.pool, dep_id).await? {
        tracing::info!(dep_id, "Department deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Department", dep_id)))
    }
}

// ---------------------------------------------------------------------------
// Researchers
// ---------------------------------------------------------------------------

/// POST /api/v1/department/researcher
pub async fn add_researchers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<DepartmentResearcher>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<DepartmentResearcher>>>)> {
    let links = input.into_vec();
    DepartmentRepo::add_researchers(&state.pool, &links).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: links })))
}

/// GET /api/v1/department/{dep_id}/researcher
pub async fn list_researchers(
    State(state): State<AppState>,
    Path(dep_id): Path<DepId>,
) -> AppResult<Json<DataResponse<Vec<Researcher>>>> {
    let rows = DepartmentRepo::list_researchers(&state.pool, dep_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// DELETE /api/v1/department/{dep_id}/researcher/{researcher_id}
pub async fn remove_researcher(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((dep_id, researcher_id)): Path<(DepId, DbId)>,
) -> AppResult<StatusCode> {
    if DepartmentRepo::remove_researcher(&state.pool, dep_id, researcher_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Researcher is not linked to this department".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// Disciplines
// ---------------------------------------------------------------------------

/// POST /api/v1/department/discipline
pub async fn add_disciplines(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<DisciplineInput>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Discipline>>>)> {
    let disciplines: Vec<NewDiscipline> = input.into_vec().into_iter().map(Into::into).collect();
    let created = DepartmentRepo::add_disciplines(&state.pool, &disciplines).await?;
    tracing::info!(count = created.len(), "Disciplines imported");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/department/discipline
pub async fn list_disciplines(
    State(state): State<AppState>,
    Query(params): Query<DepartmentParams>,
) -> AppResult<Json<DataResponse<Vec<Discipline>>>> {
    let rows = DepartmentRepo::list_disciplines(&state.pool, params.dep_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/department/discipline/semester
pub async fn discipline_semesters(
    State(state): State<AppState>,
    Query(params): Query<DepartmentParams>,
) -> AppResult<Json<DataResponse<Vec<SemesterRef>>>> {
    let rows = DepartmentRepo::discipline_semesters(&state.pool, params.dep_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discipline_input_normalizes_semester_and_professors() {
        let input: DisciplineInput = serde_json::from_value(serde_json::json!({
            "dep_id": 10,
            "semester": "2024/1",
            "id": "T01",
            "professor": "Ana Souza,123,Titular\nJoão Lima,456,Colaborador"
        }))
        .unwrap();
        let d = NewDiscipline::from(input);
        assert_eq!(d.semester, "2024.1");
        assert_eq!(d.offering_id.as_deref(), Some("T01"));
        assert_eq!(d.professors.len(), 2);
        assert_eq!(d.professors[1].ufmg_id, "456");
    }

    #[test]
    fn discipline_without_professor_gets_placeholder() {
        let input: DisciplineInput =
            serde_json::from_value(serde_json::json!({ "dep_id": 1, "semester": "2023.2" }))
                .unwrap();
        let d = NewDiscipline::from(input);
        assert_eq!(d.professors.len(), 1);
        assert!(d.professors[0].name.is_empty());
    }
}
