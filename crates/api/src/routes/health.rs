use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Open `/ws` connections.
    pub ws_connections: usize,
}

/// GET /health -- service, database and WebSocket registry health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = simcc_db::health_check(&state.pool).await.is_ok();
    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ws_connections: state.ws_manager.connection_count().await,
    })
}

/// Mount health check routes (root level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
