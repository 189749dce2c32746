//! Repository for the `users` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, username, email, password_hash, provider, verify, \
    institution_id, linkedin, photo_url, lattes_id, created_at, updated_at";

/// Provides CRUD operations for user accounts. Deleted users are invisible.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (username, email, password_hash, provider, institution_id, linkedin, lattes_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.provider)
            .bind(input.institution_id)
            .bind(&input.linkedin)
            .bind(&input.lattes_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE user_id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1) AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Usernames for a set of ids, in the order given. Unknown ids are skipped.
    pub async fn usernames(pool: &PgPool, ids: &[DbId]) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.username FROM UNNEST($1::uuid[]) WITH ORDINALITY AS t(id, ord) \
             JOIN users u ON u.user_id = t.id \
             ORDER BY t.ord",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL \
             ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                username = COALESCE($2, username), \
                email = COALESCE($3, email), \
                institution_id = COALESCE($4, institution_id), \
                linkedin = COALESCE($5, linkedin), \
                photo_url = COALESCE($6, photo_url), \
                lattes_id = COALESCE($7, lattes_id), \
                verify = COALESCE($8, verify), \
                updated_at = NOW() \
             WHERE user_id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(input.institution_id)
            .bind(&input.linkedin)
            .bind(&input.photo_url)
            .bind(&input.lattes_id)
            .bind(input.verify)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a user. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
