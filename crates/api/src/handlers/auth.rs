//! Handler for `POST /token` (password login).

use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::{Deserialize, Serialize};
use simcc_core::error::CoreError;
use simcc_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// OAuth2 password-grant form. `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/v1/token
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> AppResult<Json<TokenResponse>> {
    let rejected = || AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, &form.username)
        .await?
        .ok_or_else(rejected)?;

    let valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = %user.user_id, "Rejected login");
        return Err(rejected());
    }

    let access_token = generate_access_token(user.user_id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = %user.user_id, "User logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
