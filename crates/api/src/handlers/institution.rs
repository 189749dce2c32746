//! Handlers for the `/institution` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::institution::{
    CreateInstitution, Institution, InstitutionStats, UpdateInstitution,
};
use simcc_db::repositories::InstitutionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/institution
///
/// Accepts a single institution or a list; all rows are inserted in one
/// transaction.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<CreateInstitution>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Institution>>>)> {
    let inputs = input.into_vec();
    if inputs.iter().any(|i| i.name.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "institution name must not be empty".into(),
        )));
    }
    let created = InstitutionRepo::create_many(&state.pool, &inputs).await?;
    tracing::info!(count = created.len(), "Institutions created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/institution
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InstitutionStats>>>> {
    let rows = InstitutionRepo::list_with_stats(&state.pool, None).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/institution/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<InstitutionStats>>> {
    let row = InstitutionRepo::list_with_stats(&state.pool, Some(id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Core(CoreError::not_found("Institution", id)))?;
    Ok(Json(DataResponse { data: row }))
}

/// PUT /api/v1/institution
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateInstitution>,
) -> AppResult<Json<DataResponse<Institution>>> {
    let institution = InstitutionRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("Institution", input.institution_id))
        })?;
    Ok(Json(DataResponse { data: institution }))
}

/// DELETE /api/v1/institution/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if InstitutionRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(institution_id = %id, "Institution deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Institution", id)))
    }
}
