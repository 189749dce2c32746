//! Repository for the `permissions` and `role_permissions` tables.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::rbac::Permission;

const COLUMNS: &str = "permission_id, name, created_at";

pub struct PermissionRepo;

impl PermissionRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Permission, sqlx::Error> {
        let query = format!("INSERT INTO permissions (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Permission>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions ORDER BY name ASC");
        sqlx::query_as::<_, Permission>(&query).fetch_all(pool).await
    }

    /// Grant several permissions to a role in one transaction.
    ///
    /// Already-granted permissions are left untouched.
    pub async fn grant_to_role(
        pool: &PgPool,
        role_id: DbId,
        permission_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for &permission_id in permission_ids {
            sqlx::query(
                "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(role_id)
            .bind(permission_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    pub async fn revoke_from_role(
        pool: &PgPool,
        role_id: DbId,
        permission_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_for_role(pool: &PgPool, role_id: DbId) -> Result<Vec<Permission>, sqlx::Error> {
        sqlx::query_as::<_, Permission>(
            "SELECT p.permission_id, p.name, p.created_at \
             FROM permissions p JOIN role_permissions rp ON rp.permission_id = p.permission_id \
             WHERE rp.role_id = $1 \
             ORDER BY p.name",
        )
        .bind(role_id)
        .fetch_all(pool)
        .await
    }

    /// Distinct permissions a user holds through any of their roles.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Permission>, sqlx::Error> {
        sqlx::query_as::<_, Permission>(
            "SELECT DISTINCT p.permission_id, p.name, p.created_at \
             FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.permission_id \
             JOIN user_roles ur ON ur.role_id = rp.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY p.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Names only, for authorization checks.
    pub async fn names_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT p.name \
             FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.permission_id \
             JOIN user_roles ur ON ur.role_id = rp.role_id \
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
