//! Repositories for the `tags` and `areas` catalogs.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::catalog::{Area, CreateArea, CreateTag, Tag, UpdateArea, UpdateTag};

const TAG_COLUMNS: &str = "tag_id, name, color_code, created_at";
const AREA_COLUMNS: &str = "area_id, name, created_at";

pub struct TagRepo;

impl TagRepo {
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, color_code) VALUES ($1, $2) RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .bind(&input.color_code)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE tag_id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Update a tag. Only non-`None` fields in `input` are applied.
    pub async fn update(pool: &PgPool, input: &UpdateTag) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET \
                name = COALESCE($2, name), \
                color_code = COALESCE($3, color_code) \
             WHERE tag_id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(input.tag_id)
            .bind(&input.name)
            .bind(&input.color_code)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct AreaRepo;

impl AreaRepo {
    pub async fn create(pool: &PgPool, input: &CreateArea) -> Result<Area, sqlx::Error> {
        let query = format!("INSERT INTO areas (name) VALUES ($1) RETURNING {AREA_COLUMNS}");
        sqlx::query_as::<_, Area>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Area>, sqlx::Error> {
        let query = format!("SELECT {AREA_COLUMNS} FROM areas WHERE area_id = $1");
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Area>, sqlx::Error> {
        let query = format!("SELECT {AREA_COLUMNS} FROM areas ORDER BY name");
        sqlx::query_as::<_, Area>(&query).fetch_all(pool).await
    }

    pub async fn update(pool: &PgPool, input: &UpdateArea) -> Result<Option<Area>, sqlx::Error> {
        let query = format!(
            "UPDATE areas SET name = $2 WHERE area_id = $1 RETURNING {AREA_COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(input.area_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM areas WHERE area_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
