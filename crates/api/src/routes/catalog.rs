//! Route definitions for `/tag` and `/area`. Writes require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/tag`.
///
/// ```text
/// POST   /                          -> create_tag
/// GET    /                          -> list_tags
/// PUT    /                          -> update_tag (partial, by tag_id)
/// GET    /{id}                      -> get_tag
/// DELETE /{id}                      -> delete_tag
/// ```
pub fn tag_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(catalog::create_tag)
                .get(catalog::list_tags)
                .put(catalog::update_tag),
        )
        .route("/{id}", get(catalog::get_tag).delete(catalog::delete_tag))
}

/// Routes mounted at `/area`.
pub fn area_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(catalog::create_area)
                .get(catalog::list_areas)
                .put(catalog::update_area),
        )
        .route("/{id}", get(catalog::get_area).delete(catalog::delete_area))
}
