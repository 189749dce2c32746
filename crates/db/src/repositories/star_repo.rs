//! Repository for the `stars` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::star::{CreateStar, Star};

pub struct StarRepo;

impl StarRepo {
    /// Star an entry. A second star on the same entry violates `uq_stars`.
    pub async fn create(pool: &PgPool, user_id: DbId, input: &CreateStar) -> Result<Star, sqlx::Error> {
        sqlx::query_as::<_, Star>(
            "INSERT INTO stars (user_id, entry_id, type) VALUES ($1, $2, $3) \
             RETURNING user_id, entry_id, type, created_at",
        )
        .bind(user_id)
        .bind(input.entry_id)
        .bind(&input.entry_type)
        .fetch_one(pool)
        .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Star>, sqlx::Error> {
        sqlx::query_as::<_, Star>(
            "SELECT user_id, entry_id, type, created_at FROM stars \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, entry_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stars WHERE user_id = $1 AND entry_id = $2")
            .bind(user_id)
            .bind(entry_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
