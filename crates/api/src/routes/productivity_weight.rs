use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::productivity_weight;
use crate::state::AppState;

/// Routes mounted at `/productivity-weight`.
///
/// ```text
/// POST   /                          -> set (auth, one row per institution)
/// GET    /                          -> list (institution_id)
/// DELETE /{id}                      -> delete (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(productivity_weight::set).get(productivity_weight::list),
        )
        .route("/{id}", delete(productivity_weight::delete))
}
