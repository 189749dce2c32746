use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::collection;
use crate::handlers::uploads::UploadTarget;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/collection`. All require authentication.
///
/// ```text
/// POST   /                          -> create
/// GET    /                          -> list (own)
/// GET    /public/{user_id}          -> list_public
/// GET    /{id}                      -> get_by_id (own)
/// PUT    /{id}                      -> update (own)
/// DELETE /{id}                      -> delete (own, soft)
/// POST   /{id}/entries              -> add_entry (owner)
/// GET    /{id}/entries              -> list_entries (owner or visible)
/// DELETE /{id}/entries/{entry_id}   -> remove_entry (owner)
/// GET|POST|DELETE /{id}/upload/{kind}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(collection::create).get(collection::list))
        .route("/public/{user_id}", get(collection::list_public))
        .route(
            "/{id}",
            get(collection::get_by_id)
                .put(collection::update)
                .delete(collection::delete),
        )
        .route(
            "/{id}/entries",
            post(collection::add_entry).get(collection::list_entries),
        )
        .route("/{id}/entries/{entry_id}", delete(collection::remove_entry))
        .route("/{id}/upload/{kind}", entity_upload(UploadTarget::Collection))
}
