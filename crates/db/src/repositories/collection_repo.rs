//! Repository for user collections and their entries.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::collection::{
    Collection, CollectionEntry, CreateCollection, CreateCollectionEntry, UpdateCollection,
};

const COLUMNS: &str = "collection_id, user_id, name, description, visible, created_at, updated_at";

/// Provides CRUD operations for collections. Deleted rows are hidden.
pub struct CollectionRepo;

impl CollectionRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCollection,
    ) -> Result<Collection, sqlx::Error> {
        let query = format!(
            "INSERT INTO collections (user_id, name, description) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections WHERE collection_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's collections. `only_visible` hides private ones.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        only_visible: bool,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collections \
             WHERE user_id = $1 AND deleted_at IS NULL \
               AND (NOT $2 OR visible) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(user_id)
            .bind(only_visible)
            .fetch_all(pool)
            .await
    }

    /// Update a collection owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateCollection,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let query = format!(
            "UPDATE collections SET \
                name = COALESCE($3, name), \
                description = COALESCE($4, description), \
                visible = COALESCE($5, visible), \
                updated_at = NOW() \
             WHERE collection_id = $1 AND user_id = $2 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collection>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.visible)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE collections SET deleted_at = NOW(), visible = FALSE \
             WHERE collection_id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- entries ------------------------------------------------------------

    pub async fn add_entry(
        pool: &PgPool,
        collection_id: DbId,
        input: &CreateCollectionEntry,
    ) -> Result<CollectionEntry, sqlx::Error> {
        sqlx::query_as::<_, CollectionEntry>(
            "INSERT INTO collection_entries (collection_id, entry_id, type) \
             VALUES ($1, $2, $3) \
             RETURNING collection_id, entry_id, type, created_at",
        )
        .bind(collection_id)
        .bind(input.entry_id)
        .bind(&input.entry_type)
        .fetch_one(pool)
        .await
    }

    pub async fn list_entries(
        pool: &PgPool,
        collection_id: DbId,
    ) -> Result<Vec<CollectionEntry>, sqlx::Error> {
        sqlx::query_as::<_, CollectionEntry>(
            "SELECT collection_id, entry_id, type, created_at FROM collection_entries \
             WHERE collection_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(collection_id)
        .fetch_all(pool)
        .await
    }

    pub async fn remove_entry(
        pool: &PgPool,
        collection_id: DbId,
        entry_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM collection_entries WHERE collection_id = $1 AND entry_id = $2",
        )
        .bind(collection_id)
        .bind(entry_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
