//! Well-known permission and role name constants.
//!
//! These must match the seed data in `20250101000003_create_rbac_tables.sql`.

/// Grants every administrative route (user listing, RBAC, role assignment).
pub const PERM_ADMIN: &str = "ADMIN";

/// Seeded role carrying [`PERM_ADMIN`].
pub const ROLE_ADMIN: &str = "ADMIN";
