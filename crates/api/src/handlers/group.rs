//! Handlers for the `/group` resource (research groups).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use simcc_core::types::DbId;
use simcc_db::models::research_group::{
    CreateResearchGroup, ResearchGroup, UpdateResearchGroup,
};
use simcc_db::repositories::ResearchGroupRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/group
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateResearchGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<ResearchGroup>>)> {
    if input.name.trim().is_empty() || input.group_identifier.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and group_identifier are required".into(),
        )));
    }
    let group = ResearchGroupRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/v1/group
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ResearchGroup>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let groups = ResearchGroupRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/group/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ResearchGroup>>> {
    let group = ResearchGroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ResearchGroup", id)))?;
    Ok(Json(DataResponse { data: group }))
}

/// PUT /api/v1/group
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateResearchGroup>,
) -> AppResult<Json<DataResponse<ResearchGroup>>> {
    let group = ResearchGroupRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ResearchGroup", input.id)))?;
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/group/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ResearchGroupRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("ResearchGroup", id)))
    }
}
