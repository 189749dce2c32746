use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/token`.
///
/// ```text
/// POST   /                          -> login (public, form-encoded)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(auth::login))
}
