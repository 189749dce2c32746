//! Repository for the `roles` and `user_roles` tables.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::rbac::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "role_id, name, created_at, updated_at";

/// Provides CRUD operations for roles and their user assignments.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Role, sqlx::Error> {
        let query = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE role_id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY name ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET name = $2, updated_at = NOW() WHERE role_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a role and, via cascade, its grants and assignments.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE role_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- user assignments ---------------------------------------------------

    /// Assign a role to a user. A duplicate assignment violates `uq_user_roles`.
    pub async fn assign_to_user(
        pool: &PgPool,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn unassign_from_user(
        pool: &PgPool,
        user_id: DbId,
        role_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT r.role_id, r.name, r.created_at, r.updated_at \
             FROM roles r JOIN user_roles ur ON ur.role_id = r.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
