use axum::routing::{get, post};
use axum::Router;

use crate::handlers::technician;
use crate::state::AppState;

/// Routes mounted at `/technician`.
///
/// ```text
/// POST   /                          -> import (auth, HR export rows)
/// GET    /                          -> list (year, semester; default latest)
/// GET    /semester                  -> semesters
/// POST   /role                      -> add_roles (auth)
/// GET    /role                      -> list_roles
/// POST   /department                -> link_departments (auth)
/// DELETE /department                -> unlink_department (auth; technician_id, dep_id)
/// GET    /{id}/department           -> departments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(technician::import).get(technician::list))
        .route("/semester", get(technician::semesters))
        .route("/role", post(technician::add_roles).get(technician::list_roles))
        .route(
            "/department",
            post(technician::link_departments).delete(technician::unlink_department),
        )
        .route("/{id}/department", get(technician::departments))
}
