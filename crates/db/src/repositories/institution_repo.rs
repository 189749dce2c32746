//! Repository for the `institutions` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::institution::{
    CreateInstitution, Institution, InstitutionStats, UpdateInstitution,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "institution_id, name, acronym, lattes_id, created_at, updated_at";

/// Aggregate counts per institution, appended to the base columns.
const STATS_COLUMNS: &str = "\
    (SELECT COUNT(*) FROM researchers r \
        WHERE r.institution_id = i.institution_id AND r.deleted_at IS NULL) AS count_r, \
    (SELECT COUNT(*) FROM graduate_programs gp \
        WHERE gp.institution_id = i.institution_id) AS count_gp, \
    (SELECT COUNT(*) FROM graduate_program_researchers gpr \
        JOIN graduate_programs gp ON gp.graduate_program_id = gpr.graduate_program_id \
        JOIN researchers r ON r.researcher_id = gpr.researcher_id \
        WHERE gp.institution_id = i.institution_id AND r.deleted_at IS NULL) AS count_gpr, \
    (SELECT COUNT(*) FROM graduate_program_students gps \
        JOIN graduate_programs gp ON gp.graduate_program_id = gps.graduate_program_id \
        JOIN researchers r ON r.researcher_id = gps.researcher_id \
        WHERE gp.institution_id = i.institution_id AND r.deleted_at IS NULL) AS count_gps, \
    (SELECT COUNT(DISTINCT dr.dep_id) FROM department_researchers dr \
        JOIN researchers r ON r.researcher_id = dr.researcher_id \
        WHERE r.institution_id = i.institution_id AND r.deleted_at IS NULL) AS count_d, \
    (SELECT COUNT(DISTINCT dt.technician_id) FROM department_technicians dt \
        WHERE dt.dep_id IN (SELECT dr.dep_id FROM department_researchers dr \
            JOIN researchers r ON r.researcher_id = dr.researcher_id \
            WHERE r.institution_id = i.institution_id AND r.deleted_at IS NULL)) AS count_t";

/// Provides CRUD operations for institutions. Deleted rows are hidden.
pub struct InstitutionRepo;

impl InstitutionRepo {
    /// Insert a batch of institutions atomically.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateInstitution],
    ) -> Result<Vec<Institution>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO institutions (institution_id, name, acronym, lattes_id) \
             VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4) \
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let row = sqlx::query_as::<_, Institution>(&query)
                .bind(input.institution_id)
                .bind(&input.name)
                .bind(&input.acronym)
                .bind(&input.lattes_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Institution>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM institutions WHERE institution_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Institution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List institutions with their aggregate counts, optionally just one.
    pub async fn list_with_stats(
        pool: &PgPool,
        institution_id: Option<DbId>,
    ) -> Result<Vec<InstitutionStats>, sqlx::Error> {
        let query = format!(
            "SELECT i.institution_id, i.name, i.acronym, i.lattes_id, i.created_at, i.updated_at, \
                {STATS_COLUMNS} \
             FROM institutions i \
             WHERE i.deleted_at IS NULL AND ($1::uuid IS NULL OR i.institution_id = $1) \
             ORDER BY i.name ASC"
        );
        sqlx::query_as::<_, InstitutionStats>(&query)
            .bind(institution_id)
            .fetch_all(pool)
            .await
    }

    /// Update an institution. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateInstitution,
    ) -> Result<Option<Institution>, sqlx::Error> {
        let query = format!(
            "UPDATE institutions SET \
                name = COALESCE($2, name), \
                acronym = COALESCE($3, acronym), \
                lattes_id = COALESCE($4, lattes_id), \
                updated_at = NOW() \
             WHERE institution_id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Institution>(&query)
            .bind(input.institution_id)
            .bind(&input.name)
            .bind(&input.acronym)
            .bind(&input.lattes_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an institution. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE institutions SET deleted_at = NOW() \
             WHERE institution_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
