//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from a JWT or API key.
//! - [`rbac::RequireAdmin`] -- requires the `ADMIN` permission.

pub mod auth;
pub mod rbac;
