//! Route definitions for the `/user` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::uploads::{self, UploadTarget};
use crate::handlers::users;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /                          -> create (public)
/// GET    /                          -> list (admin)
/// PUT    /                          -> update (self or admin)
/// GET    /my-self                   -> my_self
/// GET    /{id}                      -> get_by_id (self or admin)
/// DELETE /{id}                      -> delete (self or admin)
///
/// POST   /role                      -> assign_role (admin)
/// DELETE /role                      -> unassign_role (admin)
///
/// POST   /keys                      -> create_key
/// GET    /keys                      -> list_keys
/// DELETE /keys/{id}                 -> delete_key
///
/// GET|POST|DELETE /upload/my/{kind}         -> caller's icon / cover
/// GET|POST|DELETE /upload/{user_id}/{kind}  -> any user's icon / cover
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create).get(users::list).put(users::update))
        .route("/my-self", get(users::my_self))
        .route("/{id}", get(users::get_by_id).delete(users::delete))
        .route(
            "/role",
            post(users::assign_role).delete(users::unassign_role),
        )
        .route("/keys", post(users::create_key).get(users::list_keys))
        .route("/keys/{id}", delete(users::delete_key))
        .route(
            "/upload/my/{kind}",
            get(uploads::get_my_file)
                .post(uploads::upload_my_file)
                .delete(uploads::delete_my_file),
        )
        .route("/upload/{user_id}/{kind}", entity_upload(UploadTarget::User))
}
