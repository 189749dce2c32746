//! Handlers for `/notification`.
//!
//! New notifications are stored and then pushed to every `/ws` connection of
//! the recipient; offline recipients pick them up from the list endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::notification::{CreateNotification, Notification};
use simcc_db::repositories::{NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn notification_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Notification", id))
}

/// POST /api/v1/notification
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", input.user_id)))?;

    let notification = NotificationRepo::create(&state.pool, Some(auth.user_id), &input).await?;

    let delivered = state
        .ws_manager
        .send_json_to_user(
            notification.user_id,
            &json!({ "type": "notification", "data": &notification }),
        )
        .await;
    tracing::debug!(
        notification_id = %notification.notification_id,
        recipient = %notification.user_id,
        kind = input.notification_type.as_str(),
        delivered,
        "Notification created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}

/// GET /api/v1/notification
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let rows = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/notification/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::mark_read(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(notification_not_found(id))
    }
}

/// DELETE /api/v1/notification/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(notification_not_found(id))
    }
}
