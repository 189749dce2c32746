//! Handlers for the `/user` resource: accounts, role assignment and
//! personal API keys.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use simcc_core::api_keys::generate_api_key;
use simcc_core::error::CoreError;
use simcc_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use simcc_core::types::DbId;
use simcc_db::models::api_key::{ApiKey, CreateApiKey};
use simcc_db::models::rbac::UserRoleAssignment;
use simcc_db::models::user::{CreateUser, RegisterUser, UpdateUser, User, UserProfile};
use simcc_db::repositories::{ApiKeyRepo, PermissionRepo, RoleRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const LOCAL_PROVIDER: &str = "local";

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// POST /api/v1/user
///
/// Public registration.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username must not be empty".into(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "email is not valid".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let create = CreateUser {
        username: input.username.trim().to_string(),
        email: input.email.trim().to_string(),
        password_hash,
        provider: LOCAL_PROVIDER.to_string(),
        institution_id: input.institution_id,
        linkedin: input.linkedin,
        lattes_id: input.lattes_id,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = %user.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/user
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/user/my-self
pub async fn my_self(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let profile = load_profile(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/user/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    auth.ensure_self_or_admin(id)?;
    let profile = load_profile(&state, id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/user
///
/// Updates the caller. Admins may target another account via `user_id`
/// and are the only ones allowed to change `verify`.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<User>>> {
    let target = input.user_id.unwrap_or(auth.user_id);
    auth.ensure_self_or_admin(target)?;
    if !auth.is_admin() {
        input.verify = None;
    }

    let user = UserRepo::update(&state.pool, target, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", target)))?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/user/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.ensure_self_or_admin(id)?;
    if UserRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(user_id = %id, deleted_by = %auth.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("User", id)))
    }
}

async fn load_profile(state: &AppState, user_id: DbId) -> AppResult<UserProfile> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", user_id)))?;
    let roles = RoleRepo::list_for_user(&state.pool, user_id).await?;
    let permissions = PermissionRepo::list_for_user(&state.pool, user_id).await?;
    Ok(UserProfile {
        user,
        roles,
        permissions,
    })
}

// ---------------------------------------------------------------------------
// Role assignment
// ---------------------------------------------------------------------------

/// POST /api/v1/user/role
pub async fn assign_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UserRoleAssignment>,
) -> AppResult<(StatusCode, Json<DataResponse<UserRoleAssignment>>)> {
    RoleRepo::assign_to_user(&state.pool, input.user_id, input.role_id).await?;
    tracing::info!(
        user_id = %input.user_id,
        role_id = %input.role_id,
        assigned_by = %admin.user_id,
        "Role assigned"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: input })))
}

/// DELETE /api/v1/user/role
pub async fn unassign_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UserRoleAssignment>,
) -> AppResult<StatusCode> {
    if RoleRepo::unassign_from_user(&state.pool, input.user_id, input.role_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Role is not assigned to this user".into(),
        )))
    }
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

/// A newly created key. `key` is only ever returned here.
#[derive(Debug, Serialize)]
pub struct CreatedApiKey {
    #[serde(flatten)]
    pub api_key: ApiKey,
    pub key: String,
}

/// POST /api/v1/user/keys
pub async fn create_key(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateApiKey>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedApiKey>>)> {
    let generated = generate_api_key();
    let api_key = ApiKeyRepo::create(
        &state.pool,
        auth.user_id,
        &input.name,
        &generated.prefix,
        &generated.hash,
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, key_id = %api_key.key_id, "API key created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedApiKey {
                api_key,
                key: generated.plaintext,
            },
        }),
    ))
}

/// GET /api/v1/user/keys
pub async fn list_keys(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ApiKey>>>> {
    let keys = ApiKeyRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: keys }))
}

/// DELETE /api/v1/user/keys/{id}
pub async fn delete_key(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(key_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ApiKeyRepo::delete(&state.pool, key_id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("ApiKey", key_id)))
    }
}
