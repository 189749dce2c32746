//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in handlers via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?institution_id=` filter shared by the count endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct InstitutionParams {
    pub institution_id: Option<simcc_core::types::DbId>,
}
