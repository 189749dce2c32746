//! Handlers for `/stars`: entries a user has bookmarked.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::star::{CreateStar, Star};
use simcc_db::repositories::StarRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/stars
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStar>,
) -> AppResult<(StatusCode, Json<DataResponse<Star>>)> {
    if input.entry_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "type must not be empty".into(),
        )));
    }
    let star = StarRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: star })))
}

/// GET /api/v1/stars
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Star>>>> {
    let stars = StarRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stars }))
}

/// DELETE /api/v1/stars/{entry_id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StarRepo::delete(&state.pool, auth.user_id, entry_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Star not found for this user and entry_id".into(),
        )))
    }
}
