//! Handlers for the public `/newsletter` and `/feedback` channels.
//!
//! Submitting is open to visitors; reading the collected data needs `ADMIN`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::contact::{CreateFeedback, Feedback, NewsletterSubscriber};
use simcc_db::repositories::{FeedbackRepo, NewsletterRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailInput {
    pub email: String,
}

fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    if !email.contains('@') {
        return Err(CoreError::Validation("email is not valid".into()));
    }
    Ok(email)
}

fn validate_feedback(input: &CreateFeedback) -> Result<(), CoreError> {
    let name_len = input.name.trim().chars().count();
    if !(3..=100).contains(&name_len) {
        return Err(CoreError::Validation(
            "name must have between 3 and 100 characters".into(),
        ));
    }
    if !(0..=10).contains(&input.rating) {
        return Err(CoreError::Validation("rating must be between 0 and 10".into()));
    }
    Ok(())
}

// -- newsletter -------------------------------------------------------------

/// POST /api/v1/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<EmailInput>,
) -> AppResult<(StatusCode, Json<DataResponse<NewsletterSubscriber>>)> {
    let email = normalize_email(&input.email)?;
    let subscriber = NewsletterRepo::subscribe(&state.pool, &email).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: subscriber })))
}

/// GET /api/v1/newsletter
pub async fn list_subscribers(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NewsletterSubscriber>>>> {
    let rows = NewsletterRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// DELETE /api/v1/newsletter?email=
pub async fn unsubscribe(
    State(state): State<AppState>,
    Query(input): Query<EmailInput>,
) -> AppResult<StatusCode> {
    let email = normalize_email(&input.email)?;
    if NewsletterRepo::unsubscribe(&state.pool, &email).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("NewsletterSubscriber", email)))
    }
}

// -- feedback ---------------------------------------------------------------

/// POST /api/v1/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(mut input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<DataResponse<Feedback>>)> {
    validate_feedback(&input)?;
    input.name = input.name.trim().to_string();
    input.email = normalize_email(&input.email)?;
    let feedback = FeedbackRepo::create(&state.pool, &input).await?;
    tracing::info!(
        feedback_id = %feedback.feedback_id,
        rating = feedback.rating,
        "Feedback received"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/feedback
pub async fn list_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Feedback>>>> {
    let rows = FeedbackRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// DELETE /api/v1/feedback/{id}
pub async fn delete_feedback(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FeedbackRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Feedback", id)))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn feedback(name: &str, rating: i16) -> CreateFeedback {
        CreateFeedback {
            name: name.into(),
            email: "a@b.com".into(),
            rating,
            description: None,
        }
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert_matches!(normalize_email("ana.example.com"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn feedback_bounds() {
        assert!(validate_feedback(&feedback("Ana", 0)).is_ok());
        assert!(validate_feedback(&feedback("Ana", 10)).is_ok());
        assert_matches!(validate_feedback(&feedback("Al", 5)), Err(CoreError::Validation(_)));
        assert_matches!(validate_feedback(&feedback("Ana", 11)), Err(CoreError::Validation(_)));
        assert_matches!(validate_feedback(&feedback("Ana", -1)), Err(CoreError::Validation(_)));
    }
}
