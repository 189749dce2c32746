//! User account models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use simcc_core::types::{DbId, Timestamp};

use super::rbac::{Permission, Role};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub provider: String,
    pub verify: bool,
    pub institution_id: Option<DbId>,
    pub linkedin: Option<String>,
    pub photo_url: Option<String>,
    pub lattes_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with the roles and permissions granted to them.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

/// Registration payload as received from the client.
#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub institution_id: Option<DbId>,
    pub linkedin: Option<String>,
    pub lattes_id: Option<String>,
}

/// DTO for inserting a user; the password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub provider: String,
    pub institution_id: Option<DbId>,
    pub linkedin: Option<String>,
    pub lattes_id: Option<String>,
}

/// DTO for updating a user. Only non-`None` fields are applied.
///
/// `user_id` defaults to the caller; only admins may target someone else.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub institution_id: Option<DbId>,
    pub linkedin: Option<String>,
    pub photo_url: Option<String>,
    pub lattes_id: Option<String>,
    pub verify: Option<bool>,
}
