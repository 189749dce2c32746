use axum::routing::{get, post};
use axum::Router;

use crate::handlers::group;
use crate::handlers::uploads::UploadTarget;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/group`. All require authentication except image reads.
///
/// ```text
/// POST   /                          -> create
/// GET    /                          -> list
/// PUT    /                          -> update (partial, by id)
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> delete (soft)
/// GET|POST|DELETE /{id}/upload/{kind}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(group::create).get(group::list).put(group::update))
        .route("/{id}", get(group::get_by_id).delete(group::delete))
        .route("/{id}/upload/{kind}", entity_upload(UploadTarget::Group))
}
