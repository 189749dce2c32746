//! Authentication extractor for Axum handlers.
//!
//! A request is authenticated by, in order:
//! 1. `Authorization: Bearer <jwt>`
//! 2. an `access_token` cookie holding the same JWT
//! 3. an `x-api-key` header holding a personal API key

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use simcc_core::api_keys::hash_api_key;
use simcc_core::error::CoreError;
use simcc_core::permissions::PERM_ADMIN;
use simcc_core::types::DbId;
use simcc_db::repositories::{ApiKeyRepo, PermissionRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Message for any token that fails validation.
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

const API_KEY_HEADER: &str = "x-api-key";
const TOKEN_COOKIE: &str = "access_token";

/// The authenticated caller, with the permission names granted through
/// their roles.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
    pub permissions: Vec<String>,
}

impl AuthUser {
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_permission(PERM_ADMIN)
    }

    /// Allow the owner of a resource, or an admin.
    pub fn ensure_self_or_admin(&self, owner_id: DbId) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Not allowed to act on another user's resources".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer_token(&parts.headers).or_else(|| cookie_token(&parts.headers))
        {
            return authenticate_token(state, &token).await;
        }

        if let Some(key) = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            return authenticate_api_key(state, key).await;
        }

        Err(AppError::Core(CoreError::Unauthorized(
            "Not authenticated".into(),
        )))
    }
}

/// Validate a JWT and load the live user it names.
pub async fn authenticate_token(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        unauthorized()
    })?;
    load_user(state, claims.sub).await
}

async fn authenticate_api_key(state: &AppState, key: &str) -> Result<AuthUser, AppError> {
    let api_key = ApiKeyRepo::find_by_hash(&state.pool, &hash_api_key(key))
        .await?
        .ok_or_else(unauthorized)?;
    load_user(state, api_key.user_id).await
}

async fn load_user(state: &AppState, user_id: DbId) -> Result<AuthUser, AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(unauthorized)?;
    let permissions = PermissionRepo::names_for_user(&state.pool, user.user_id).await?;

    Ok(AuthUser {
        user_id: user.user_id,
        email: user.email,
        permissions,
    })
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token=tok123; lang=pt"),
        );
        assert_eq!(cookie_token(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(cookie_token(&headers), None);
    }
}
