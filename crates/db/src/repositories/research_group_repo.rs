//! Repository for the `research_groups` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::research_group::{CreateResearchGroup, ResearchGroup, UpdateResearchGroup};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "group_id, name, institution, first_leader, first_leader_id, \
    second_leader, second_leader_id, area, census, start_of_collection, end_of_collection, \
    group_identifier, year, institution_name, category, created_at, updated_at";

/// Provides CRUD operations for research groups. Deleted rows are hidden.
pub struct ResearchGroupRepo;

impl ResearchGroupRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateResearchGroup,
    ) -> Result<ResearchGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO research_groups \
                (name, institution, first_leader, first_leader_id, second_leader, \
                 second_leader_id, area, census, start_of_collection, end_of_collection, \
                 group_identifier, year, institution_name, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResearchGroup>(&query)
            .bind(&input.name)
            .bind(&input.institution)
            .bind(&input.first_leader)
            .bind(input.first_leader_id)
            .bind(&input.second_leader)
            .bind(input.second_leader_id)
            .bind(&input.area)
            .bind(input.census)
            .bind(&input.start_of_collection)
            .bind(&input.end_of_collection)
            .bind(&input.group_identifier)
            .bind(input.year)
            .bind(&input.institution_name)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ResearchGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM research_groups WHERE group_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, ResearchGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<ResearchGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM research_groups WHERE deleted_at IS NULL \
             ORDER BY name ASC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ResearchGroup>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a group. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateResearchGroup,
    ) -> Result<Option<ResearchGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE research_groups SET \
                name = COALESCE($2, name), \
                institution = COALESCE($3, institution), \
                first_leader = COALESCE($4, first_leader), \
                first_leader_id = COALESCE($5, first_leader_id), \
                second_leader = COALESCE($6, second_leader), \
                second_leader_id = COALESCE($7, second_leader_id), \
                area = COALESCE($8, area), \
                census = COALESCE($9, census), \
                start_of_collection = COALESCE($10, start_of_collection), \
                end_of_collection = COALESCE($11, end_of_collection), \
                group_identifier = COALESCE($12, group_identifier), \
                year = COALESCE($13, year), \
                institution_name = COALESCE($14, institution_name), \
                category = COALESCE($15, category), \
                updated_at = NOW() \
             WHERE group_id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResearchGroup>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.institution)
            .bind(&input.first_leader)
            .bind(input.first_leader_id)
            .bind(&input.second_leader)
            .bind(input.second_leader_id)
            .bind(&input.area)
            .bind(input.census)
            .bind(&input.start_of_collection)
            .bind(&input.end_of_collection)
            .bind(&input.group_identifier)
            .bind(input.year)
            .bind(&input.institution_name)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a group. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE research_groups SET deleted_at = NOW() \
             WHERE group_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
