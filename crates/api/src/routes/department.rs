use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::department;
use crate::handlers::uploads::UploadTarget;
use crate::routes::uploads::entity_upload;
use crate::state::AppState;

/// Routes mounted at `/department`. Department ids are integers.
///
/// ```text
/// POST   /                                      -> create (auth)
/// GET    /                                      -> list (dep_id)
/// POST   /researcher                            -> add_researchers (auth)
/// POST   /discipline                            -> add_disciplines (auth)
/// GET    /discipline                            -> list_disciplines (dep_id)
/// GET    /discipline/semester                   -> discipline_semesters (dep_id)
/// GET    /{dep_id}                              -> get_by_id
/// PUT    /{dep_id}                              -> update (auth)
/// DELETE /{dep_id}                              -> delete (auth)
/// GET    /{dep_id}/researcher                   -> list_researchers
/// DELETE /{dep_id}/researcher/{researcher_id}   -> remove_researcher (auth)
/// GET|POST|DELETE /{dep_id}/upload/{kind}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(department::create).get(department::list))
        .route("/researcher", post(department::add_researchers))
        .route(
            "/discipline",
            post(department::add_disciplines).get(department::list_disciplines),
        )
        .route(
            "/discipline/semester",
            get(department::discipline_semesters),
        )
        .route(
            "/{dep_id}",
            get(department::get_by_id)
                .put(department::update)
                .delete(department::delete),
        )
        .route("/{dep_id}/researcher", get(department::list_researchers))
        .route(
            "/{dep_id}/researcher/{researcher_id}",
            delete(department::remove_researcher),
        )
        .route(
            "/{dep_id}/upload/{kind}",
            entity_upload(UploadTarget::Department),
        )
}
