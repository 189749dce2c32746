//! Handlers for the `/researcher` resource and its department links.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use simcc_core::types::DbId;
use simcc_db::models::department::Department;
use simcc_db::models::researcher::{
    CreateResearcher, DepartmentResearcher, Researcher, ResearcherFilter, UpdateResearcher,
};
use simcc_db::repositories::ResearcherRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::query::InstitutionParams;
use crate::response::{CountResponse, DataResponse};
use crate::state::AppState;

/// POST /api/v1/researcher
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<CreateResearcher>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Researcher>>>)> {
    let inputs = input.into_vec();
    for r in &inputs {
        if r.name.trim().is_empty() || r.lattes_id.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "name and lattes_id are required".into(),
            )));
        }
    }
    let created = ResearcherRepo::create_many(&state.pool, &inputs).await?;
    tracing::info!(count = created.len(), "Researchers created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/researcher
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ResearcherFilter>,
) -> AppResult<Json<DataResponse<Vec<Researcher>>>> {
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(filter.offset);
    let rows = ResearcherRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/researcher/count
pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<InstitutionParams>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = ResearcherRepo::count(&state.pool, params.institution_id).await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /api/v1/researcher/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Researcher>>> {
    let researcher = ResearcherRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Researcher", id)))?;
    Ok(Json(DataResponse { data: researcher }))
}

/// PUT /api/v1/researcher
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateResearcher>,
) -> AppResult<Json<DataResponse<Researcher>>> {
    let researcher = ResearcherRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Researcher", input.researcher_id)))?;
    Ok(Json(DataResponse { data: researcher }))
}

/// DELETE /api/v1/researcher/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ResearcherRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Researcher", id)))
    }
}

/// POST /api/v1/researcher/department
pub async fn link_departments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<DepartmentResearcher>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<DepartmentResearcher>>>)> {
    let links = input.into_vec();
    ResearcherRepo::link_departments(&state.pool, &links).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: links })))
}

/// GET /api/v1/researcher/{id}/department
pub async fn departments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let rows = ResearcherRepo::departments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rows }))
}
