//! Handlers for the `/tag` and `/area` catalogs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::catalog::{Area, CreateArea, CreateTag, Tag, UpdateArea, UpdateTag};
use simcc_db::repositories::{AreaRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// `#rgb` or `#rrggbb`.
fn is_hex_color(code: &str) -> bool {
    code.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

fn require_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name is required".into()));
    }
    Ok(())
}

fn require_color(code: &str) -> Result<(), CoreError> {
    if !is_hex_color(code) {
        return Err(CoreError::Validation(format!(
            "color_code '{code}' must look like #rgb or #rrggbb"
        )));
    }
    Ok(())
}

// -- tags -------------------------------------------------------------------

/// POST /api/v1/tag
pub async fn create_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    require_name(&input.name)?;
    require_color(&input.color_code)?;
    let tag = TagRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/tag
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/tag/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tag", id)))?;
    Ok(Json(DataResponse { data: tag }))
}

/// PUT /api/v1/tag
pub async fn update_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateTag>,
) -> AppResult<Json<DataResponse<Tag>>> {
    if let Some(name) = &input.name {
        require_name(name)?;
    }
    if let Some(code) = &input.color_code {
        require_color(code)?;
    }
    let tag = TagRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tag", input.tag_id)))?;
    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tag/{id}
pub async fn delete_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Tag", id)))
    }
}

// -- areas ------------------------------------------------------------------

/// POST /api/v1/area
pub async fn create_area(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArea>,
) -> AppResult<(StatusCode, Json<DataResponse<Area>>)> {
    require_name(&input.name)?;
    let area = AreaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: area })))
}

/// GET /api/v1/area
pub async fn list_areas(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Area>>>> {
    let areas = AreaRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: areas }))
}

/// GET /api/v1/area/{id}
pub async fn get_area(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Area>>> {
    let area = AreaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Area", id)))?;
    Ok(Json(DataResponse { data: area }))
}

/// PUT /api/v1/area
pub async fn update_area(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateArea>,
) -> AppResult<Json<DataResponse<Area>>> {
    require_name(&input.name)?;
    let area = AreaRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Area", input.area_id)))?;
    Ok(Json(DataResponse { data: area }))
}

/// DELETE /api/v1/area/{id}
pub async fn delete_area(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AreaRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Area", id)))
    }
}
