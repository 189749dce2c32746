//! Route definitions for the `/notification` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notification`.
///
/// ```text
/// POST   /                          -> create (pushes to the recipient's /ws)
/// GET    /                          -> list (own, newest first)
/// POST   /{id}/read                 -> mark_read
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(notification::create).get(notification::list))
        .route("/{id}/read", post(notification::mark_read))
        .route("/{id}", delete(notification::delete))
}
