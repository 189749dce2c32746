use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::graduate_program as program;
use crate::handlers::uploads::UploadTarget;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/graduate-program`.
///
/// ```text
/// POST   /                                  -> create (auth, list)
/// GET    /                                  -> list (institution_id, graduate_program_id)
/// PUT    /                                  -> update (auth)
/// GET    /count                             -> count (institution_id)
///
/// POST   /researcher                        -> add_researchers (auth)
/// PUT    /researcher                        -> update_researchers (auth)
/// POST   /student                           -> add_students (auth)
/// PUT    /student                           -> update_students (auth)
///
/// GET    /{id}                              -> get_by_id
/// DELETE /{id}                              -> delete (auth, cascades rosters)
/// POST   /{id}/visibility                   -> toggle_visibility (auth)
/// GET    /{id}/researcher                   -> list_researchers (type_)
/// DELETE /{id}/researcher/{researcher_id}   -> remove_researcher (auth)
/// GET    /{id}/student                      -> list_students
/// DELETE /{id}/student/{researcher_id}      -> remove_student (auth)
/// GET|POST|DELETE /{id}/upload/{kind}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(program::create).get(program::list).put(program::update),
        )
        .route("/count", get(program::count))
        .route(
            "/researcher",
            post(program::add_researchers).put(program::update_researchers),
        )
        .route(
            "/student",
            post(program::add_students).put(program::update_students),
        )
        .route("/{id}", get(program::get_by_id).delete(program::delete))
        .route("/{id}/visibility", post(program::toggle_visibility))
        .route("/{id}/researcher", get(program::list_researchers))
        .route(
            "/{id}/researcher/{researcher_id}",
            delete(program::remove_researcher),
        )
        .route("/{id}/student", get(program::list_students))
        .route(
            "/{id}/student/{researcher_id}",
            delete(program::remove_student),
        )
        .route(
            "/{id}/upload/{kind}",
            entity_upload(UploadTarget::GraduateProgram),
        )
}
