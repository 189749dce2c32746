use axum::routing::{get, post};
use axum::Router;

use crate::handlers::professor;
use crate::state::AppState;

/// Routes mounted at `/professor`.
///
/// ```text
/// POST   /                          -> import (auth, replaces the semester)
/// GET    /                          -> list (year, semester; default latest)
/// GET    /semester                  -> semesters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(professor::import).get(professor::list))
        .route("/semester", get(professor::semesters))
}
