//! Repository for the `guidance_tracking` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::guidance::{
    CreateGuidanceTracking, GuidanceFilter, GuidanceTracking, UpdateGuidanceTracking,
};

const COLUMNS: &str = "id, student_researcher_id, supervisor_researcher_id, \
    co_supervisor_researcher_id, graduate_program_id, start_date, planned_date_project, \
    done_date_project, planned_date_qualification, done_date_qualification, \
    planned_date_conclusion, done_date_conclusion, created_at, updated_at";

/// Provides CRUD operations for supervision timelines. Deleted rows are hidden.
pub struct GuidanceRepo;

impl GuidanceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGuidanceTracking,
    ) -> Result<GuidanceTracking, sqlx::Error> {
        let query = format!(
            "INSERT INTO guidance_tracking \
                (student_researcher_id, supervisor_researcher_id, co_supervisor_researcher_id, \
                 graduate_program_id, start_date, planned_date_project, done_date_project, \
                 planned_date_qualification, done_date_qualification, \
                 planned_date_conclusion, done_date_conclusion) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuidanceTracking>(&query)
            .bind(input.student_researcher_id)
            .bind(input.supervisor_researcher_id)
            .bind(input.co_supervisor_researcher_id)
            .bind(input.graduate_program_id)
            .bind(input.start_date)
            .bind(input.planned_date_project)
            .bind(input.done_date_project)
            .bind(input.planned_date_qualification)
            .bind(input.done_date_qualification)
            .bind(input.planned_date_conclusion)
            .bind(input.done_date_conclusion)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GuidanceTracking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guidance_tracking WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, GuidanceTracking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &GuidanceFilter,
    ) -> Result<Vec<GuidanceTracking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guidance_tracking \
             WHERE deleted_at IS NULL \
               AND ($1::uuid IS NULL OR supervisor_researcher_id = $1) \
               AND ($2::uuid IS NULL OR graduate_program_id = $2) \
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, GuidanceTracking>(&query)
            .bind(filter.supervisor_researcher_id)
            .bind(filter.graduate_program_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field of a tracking row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGuidanceTracking,
    ) -> Result<Option<GuidanceTracking>, sqlx::Error> {
        let query = format!(
            "UPDATE guidance_tracking SET \
                student_researcher_id = $2, \
                supervisor_researcher_id = $3, \
                co_supervisor_researcher_id = $4, \
                graduate_program_id = $5, \
                start_date = $6, \
                planned_date_project = $7, \
                done_date_project = $8, \
                planned_date_qualification = $9, \
                done_date_qualification = $10, \
                planned_date_conclusion = $11, \
                done_date_conclusion = $12, \
                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuidanceTracking>(&query)
            .bind(id)
            .bind(input.student_researcher_id)
            .bind(input.supervisor_researcher_id)
            .bind(input.co_supervisor_researcher_id)
            .bind(input.graduate_program_id)
            .bind(input.start_date)
            .bind(input.planned_date_project)
            .bind(input.done_date_project)
            .bind(input.planned_date_qualification)
            .bind(input.done_date_qualification)
            .bind(input.planned_date_conclusion)
            .bind(input.done_date_conclusion)
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE guidance_tracking SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
