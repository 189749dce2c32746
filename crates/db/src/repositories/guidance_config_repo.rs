//! Repository for the `guidance_config` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::guidance::{CreateGuidanceConfig, GuidanceConfig, UpdateGuidanceConfig};

const COLUMNS: &str = "id, config_name, duration_project_months, \
    duration_qualification_months, duration_conclusion_months, created_at, updated_at";

pub struct GuidanceConfigRepo;

impl GuidanceConfigRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGuidanceConfig,
    ) -> Result<GuidanceConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO guidance_config \
                (config_name, duration_project_months, duration_qualification_months, \
                 duration_conclusion_months) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuidanceConfig>(&query)
            .bind(&input.config_name)
            .bind(input.duration_project_months)
            .bind(input.duration_qualification_months)
            .bind(input.duration_conclusion_months)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GuidanceConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guidance_config WHERE id = $1");
        sqlx::query_as::<_, GuidanceConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        config_name: Option<&str>,
    ) -> Result<Vec<GuidanceConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guidance_config \
             WHERE ($1::text IS NULL OR config_name = $1) \
             ORDER BY config_name"
        );
        sqlx::query_as::<_, GuidanceConfig>(&query)
            .bind(config_name)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGuidanceConfig,
    ) -> Result<Option<GuidanceConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE guidance_config SET \
                config_name = COALESCE($2, config_name), \
                duration_project_months = COALESCE($3, duration_project_months), \
                duration_qualification_months = COALESCE($4, duration_qualification_months), \
                duration_conclusion_months = COALESCE($5, duration_conclusion_months), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuidanceConfig>(&query)
            .bind(id)
            .bind(&input.config_name)
            .bind(input.duration_project_months)
            .bind(input.duration_qualification_months)
            .bind(input.duration_conclusion_months)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guidance_config WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
