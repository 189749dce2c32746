use axum::routing::{get, post};
use axum::Router;

use crate::handlers::institution;
use crate::handlers::uploads::UploadTarget;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/institution`.
///
/// ```text
/// POST   /                          -> create (auth, one or many)
/// GET    /                          -> list with stats (public)
/// PUT    /                          -> update (auth)
/// GET    /{id}                      -> get_by_id (public)
/// DELETE /{id}                      -> delete (auth, soft)
/// GET|POST|DELETE /{id}/upload/{kind}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(institution::create)
                .get(institution::list)
                .put(institution::update),
        )
        .route("/{id}", get(institution::get_by_id).delete(institution::delete))
        .route("/{id}/upload/{kind}", entity_upload(UploadTarget::Institution))
}
