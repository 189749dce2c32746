//! Shared response envelope types for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ... }` body for operations that only report an outcome.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{ "count": n }` body for the count endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
