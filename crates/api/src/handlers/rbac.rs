//! Handlers for `/role` and `/permission`. Every route requires `ADMIN`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::rbac::{
    CreatePermission, CreateRole, GrantPermissions, Permission, Role, UpdateRole,
};
use simcc_db::repositories::{PermissionRepo, RoleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    Ok(name)
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// POST /api/v1/role
pub async fn create_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRole>,
) -> AppResult<(StatusCode, Json<DataResponse<Role>>)> {
    let role = RoleRepo::create(&state.pool, validate_name(&input.name)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: role })))
}

/// GET /api/v1/role
pub async fn list_roles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roles }))
}

/// GET /api/v1/role/{id}
pub async fn get_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Role>>> {
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", id)))?;
    Ok(Json(DataResponse { data: role }))
}

/// PUT /api/v1/role
pub async fn update_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<DataResponse<Role>>> {
    let role = RoleRepo::rename(&state.pool, input.role_id, validate_name(&input.name)?)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", input.role_id)))?;
    Ok(Json(DataResponse { data: role }))
}

/// DELETE /api/v1/role/{id}
pub async fn delete_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RoleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Role", id)))
    }
}

/// POST /api/v1/role/permissions
pub async fn grant_permissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<GrantPermissions>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Permission>>>)> {
    PermissionRepo::grant_to_role(&state.pool, input.role_id, &input.permission_ids).await?;
    let granted = PermissionRepo::list_for_role(&state.pool, input.role_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: granted })))
}

/// GET /api/v1/role/{id}/permission
pub async fn list_role_permissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Permission>>>> {
    let permissions = PermissionRepo::list_for_role(&state.pool, id).await?;
    Ok(Json(DataResponse { data: permissions }))
}

/// DELETE /api/v1/role/{id}/permission/{permission_id}
pub async fn revoke_permission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if PermissionRepo::revoke_from_role(&state.pool, role_id, permission_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Permission is not granted to this role".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// POST /api/v1/permission
pub async fn create_permission(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePermission>,
) -> AppResult<(StatusCode, Json<DataResponse<Permission>>)> {
    let permission = PermissionRepo::create(&state.pool, validate_name(&input.name)?).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: permission })))
}

/// GET /api/v1/permission
pub async fn list_permissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Permission>>>> {
    let permissions = PermissionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: permissions }))
}
