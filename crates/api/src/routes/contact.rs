//! Route definitions for `/newsletter` and `/feedback`.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/newsletter`.
///
/// ```text
/// POST   /                          -> subscribe (public)
/// GET    /                          -> list_subscribers (admin)
/// DELETE /?email=                   -> unsubscribe (public)
/// ```
pub fn newsletter_router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(contact::subscribe)
            .get(contact::list_subscribers)
            .delete(contact::unsubscribe),
    )
}

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST   /                          -> create_feedback (public)
/// GET    /                          -> list_feedback (admin)
/// DELETE /{id}                      -> delete_feedback (admin)
/// ```
pub fn feedback_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(contact::create_feedback).get(contact::list_feedback),
        )
        .route("/{id}", delete(contact::delete_feedback))
}
