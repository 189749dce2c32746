use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::star;
use crate::state::AppState;

/// Routes mounted at `/stars`. All require authentication.
///
/// ```text
/// POST   /                          -> create
/// GET    /                          -> list (own)
/// DELETE /{entry_id}                -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(star::create).get(star::list))
        .route("/{entry_id}", delete(star::delete))
}
