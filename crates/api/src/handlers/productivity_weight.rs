//! Handlers for the `/productivity-weight` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::productivity_weight::{
    ProductivityWeight, ProductivityWeightFilter, SetProductivityWeight,
};
use simcc_db::repositories::ProductivityWeightRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::OneOrMany;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate(input: &SetProductivityWeight) -> Result<(), CoreError> {
    match input
        .numeric()
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        Some((code, _)) => Err(CoreError::Validation(format!(
            "{code} must be a non-negative number"
        ))),
        None => Ok(()),
    }
}

/// POST /api/v1/productivity-weight
///
/// Replaces any weights already stored for the same institution.
pub async fn set(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OneOrMany<SetProductivityWeight>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ProductivityWeight>>>)> {
    let inputs = input.into_vec();
    for w in &inputs {
        validate(w)?;
    }
    let saved = ProductivityWeightRepo::upsert_many(&state.pool, &inputs).await?;
    tracing::info!(count = saved.len(), "Productivity weights stored");
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

/// GET /api/v1/productivity-weight
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductivityWeightFilter>,
) -> AppResult<Json<DataResponse<Vec<ProductivityWeight>>>> {
    let rows = ProductivityWeightRepo::list(&state.pool, filter.institution_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// DELETE /api/v1/productivity-weight/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductivityWeightRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("ProductivityWeight", id)))
    }
}
