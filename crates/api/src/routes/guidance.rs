use axum::routing::get;
use axum::Router;

use crate::handlers::guidance;
use crate::state::AppState;

/// Routes mounted at `/guidance-tracking`.
///
/// ```text
/// GET    /                          -> list (supervisor_researcher_id, graduate_program_id)
/// POST   /                          -> create (auth)
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update (auth)
/// DELETE /{id}                      -> delete (auth, soft)
/// ```
pub fn tracking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(guidance::list).post(guidance::create))
        .route(
            "/{id}",
            get(guidance::get_by_id)
                .put(guidance::update)
                .delete(guidance::delete),
        )
}

/// Routes mounted at `/guidance-config`.
///
/// ```text
/// GET    /                          -> list_configs (config_name)
/// POST   /                          -> create_config (auth)
/// GET    /{id}                      -> get_config
/// PUT    /{id}                      -> update_config (auth)
/// DELETE /{id}                      -> delete_config (auth)
/// ```
pub fn config_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(guidance::list_configs).post(guidance::create_config),
        )
        .route(
            "/{id}",
            get(guidance::get_config)
                .put(guidance::update_config)
                .delete(guidance::delete_config),
        )
}
