use axum::routing::{get, post};
use axum::Router;

use crate::handlers::researcher;
use crate::state::AppState;

/// Routes mounted at `/researcher`.
///
/// ```text
/// POST   /                          -> create (auth, one or many)
/// GET    /                          -> list (institution_id, name, lattes_id, limit, offset)
/// PUT    /                          -> update (auth)
/// GET    /count                     -> count (institution_id)
/// POST   /department                -> link_departments (auth)
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> delete (auth, soft)
/// GET    /{id}/department           -> departments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(researcher::create)
                .get(researcher::list)
                .put(researcher::update),
        )
        .route("/count", get(researcher::count))
        .route("/department", post(researcher::link_departments))
        .route("/{id}", get(researcher::get_by_id).delete(researcher::delete))
        .route("/{id}/department", get(researcher::departments))
}
