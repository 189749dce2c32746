//! Upload routes shared by every entity with an icon and a cover.

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, MethodRouter};

use crate::handlers::uploads::{self, UploadTarget};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// `GET`/`POST`/`DELETE` for `{base}/{id}/upload/{kind}` bound to `target`.
pub fn entity_upload(target: UploadTarget) -> MethodRouter<AppState> {
    get(
        move |state: State<AppState>, path: Path<(String, String)>| {
            uploads::get_file(target, state, path)
        },
    )
    .post(
        move |auth: AuthUser,
              state: State<AppState>,
              path: Path<(String, String)>,
              multipart: Multipart| {
            uploads::upload_file(target, auth, state, path, multipart)
        },
    )
    .delete(
        move |auth: AuthUser, state: State<AppState>, path: Path<(String, String)>| {
            uploads::delete_file(target, auth, state, path)
        },
    )
}
