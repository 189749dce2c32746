//! Handlers for `/guidance-tracking` and `/guidance-config`.
//!
//! Tracking rows are returned with their timeline assessment computed
//! against the current date.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::guidance::{
    AssessedGuidance, CreateGuidanceConfig, CreateGuidanceTracking, GuidanceConfig,
    GuidanceFilter, UpdateGuidanceConfig, UpdateGuidanceTracking,
};
use simcc_db::repositories::{GuidanceConfigRepo, GuidanceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const RECORD_NOT_FOUND: &str = "Registro não encontrado.";

fn record_not_found() -> AppError {
    AppError::Core(CoreError::Missing(RECORD_NOT_FOUND.into()))
}

fn validate_tracking(input: &CreateGuidanceTracking) -> AppResult<()> {
    if input.student_researcher_id == input.supervisor_researcher_id {
        return Err(AppError::Core(CoreError::Validation(
            "student and supervisor must be different researchers".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// GET /api/v1/guidance-tracking
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<GuidanceFilter>,
) -> AppResult<Json<DataResponse<Vec<AssessedGuidance>>>> {
    let today = Utc::now().date_naive();
    let rows = GuidanceRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|g| g.assessed(today))
        .collect();
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/guidance-tracking/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AssessedGuidance>>> {
    let tracking = GuidanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(record_not_found)?;
    Ok(Json(DataResponse {
        data: tracking.assessed(Utc::now().date_naive()),
    }))
}

/// POST /api/v1/guidance-tracking
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGuidanceTracking>,
) -> AppResult<(StatusCode, Json<DataResponse<AssessedGuidance>>)> {
    validate_tracking(&input)?;
    let tracking = GuidanceRepo::create(&state.pool, &input).await?;
    tracing::info!(guidance_id = %tracking.id, "Guidance tracking created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: tracking.assessed(Utc::now().date_naive()),
        }),
    ))
}

/// PUT /api/v1/guidance-tracking/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGuidanceTracking>,
) -> AppResult<Json<DataResponse<AssessedGuidance>>> {
    validate_tracking(&input)?;
    let tracking = GuidanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(record_not_found)?;
    Ok(Json(DataResponse {
        data: tracking.assessed(Utc::now().date_naive()),
    }))
}

/// DELETE /api/v1/guidance-tracking/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GuidanceRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(record_not_found())
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ConfigParams {
    pub config_name: Option<String>,
}

fn validate_durations(durations: &[Option<i32>]) -> AppResult<()> {
    if durations.iter().flatten().any(|m| *m < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "durations must not be negative".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/guidance-config
pub async fn list_configs(
    State(state): State<AppState>,
    Query(params): Query<ConfigParams>,
) -> AppResult<Json<DataResponse<Vec<GuidanceConfig>>>> {
    let rows = GuidanceConfigRepo::list(&state.pool, params.config_name.as_deref()).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/guidance-config/{id}
pub async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GuidanceConfig>>> {
    let config = GuidanceConfigRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(record_not_found)?;
    Ok(Json(DataResponse { data: config }))
}

/// POST /api/v1/guidance-config
pub async fn create_config(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGuidanceConfig>,
) -> AppResult<(StatusCode, Json<DataResponse<GuidanceConfig>>)> {
    validate_durations(&[
        Some(input.duration_project_months),
        Some(input.duration_qualification_months),
        Some(input.duration_conclusion_months),
    ])?;
    let config = GuidanceConfigRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: config })))
}

/// PUT /api/v1/guidance-config/{id}
pub async fn update_config(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGuidanceConfig>,
) -> AppResult<Json<DataResponse<GuidanceConfig>>> {
    validate_durations(&[
        input.duration_project_months,
        input.duration_qualification_months,
        input.duration_conclusion_months,
    ])?;
    let config = GuidanceConfigRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(record_not_found)?;
    Ok(Json(DataResponse { data: config }))
}

/// DELETE /api/v1/guidance-config/{id}
pub async fn delete_config(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GuidanceConfigRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(record_not_found())
    }
}
