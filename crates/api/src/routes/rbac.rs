//! Route definitions for `/role` and `/permission`. Admin only.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::rbac;
use crate::state::AppState;

/// Routes mounted at `/role`.
///
/// ```text
/// POST   /                                  -> create_role
/// GET    /                                  -> list_roles
/// PUT    /                                  -> update_role
/// POST   /permissions                       -> grant_permissions
/// GET    /{id}                              -> get_role
/// DELETE /{id}                              -> delete_role
/// GET    /{id}/permission                   -> list_role_permissions
/// DELETE /{id}/permission/{permission_id}   -> revoke_permission
/// ```
pub fn role_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(rbac::create_role)
                .get(rbac::list_roles)
                .put(rbac::update_role),
        )
        .route("/permissions", post(rbac::grant_permissions))
        .route("/{id}", get(rbac::get_role).delete(rbac::delete_role))
        .route("/{id}/permission", get(rbac::list_role_permissions))
        .route(
            "/{id}/permission/{permission_id}",
            delete(rbac::revoke_permission),
        )
}

/// Routes mounted at `/permission`.
///
/// ```text
/// POST   /                          -> create_permission
/// GET    /                          -> list_permissions
/// ```
pub fn permission_router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(rbac::create_permission).get(rbac::list_permissions),
    )
}
