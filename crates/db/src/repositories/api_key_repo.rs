//! Repository for the `api_keys` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::api_key::ApiKey;

const COLUMNS: &str = "key_id, user_id, name, key_prefix, key_hash, created_at";

pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Store a new key for a user. Only the prefix and hash are persisted.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        key_prefix: &str,
        key_hash: &str,
    ) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys (user_id, name, key_prefix, key_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(user_id)
            .bind(name)
            .bind(key_prefix)
            .bind(key_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<ApiKey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_keys WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Look up a key by the SHA-256 hash of its plaintext.
    pub async fn find_by_hash(pool: &PgPool, key_hash: &str) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_keys WHERE key_hash = $1");
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's keys. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, key_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM api_keys WHERE key_id = $1 AND user_id = $2")
            .bind(key_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
