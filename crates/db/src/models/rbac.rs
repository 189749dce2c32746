//! Role and permission models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub role_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `permissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Permission {
    pub permission_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateRole {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRole {
    pub role_id: DbId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePermission {
    pub name: String,
}

/// Grant a set of permissions to one role.
#[derive(Debug, Deserialize)]
pub struct GrantPermissions {
    pub role_id: DbId,
    pub permission_ids: Vec<DbId>,
}

/// Assign (or unassign) a role to a user.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserRoleAssignment {
    pub user_id: DbId,
    pub role_id: DbId,
}
