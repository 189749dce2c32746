//! Repository for the `researchers` and `department_researchers` tables.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::department::Department;
use crate::models::researcher::{
    CreateResearcher, DepartmentResearcher, Researcher, ResearcherFilter, UpdateResearcher,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "researcher_id, name, lattes_id, institution_id, ufmg_registration, \
    status, created_at, updated_at";

/// Provides CRUD operations for researchers. Deleted rows are hidden.
pub struct ResearcherRepo;

impl ResearcherRepo {
    /// Insert a batch of researchers atomically.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateResearcher],
    ) -> Result<Vec<Researcher>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(Self::insert_inner(&mut tx, input).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    pub(crate) async fn insert_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateResearcher,
    ) -> Result<Researcher, sqlx::Error> {
        let query = format!(
            "INSERT INTO researchers \
                (researcher_id, name, lattes_id, institution_id, ufmg_registration) \
             VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Researcher>(&query)
            .bind(input.researcher_id)
            .bind(&input.name)
            .bind(&input.lattes_id)
            .bind(input.institution_id)
            .bind(&input.ufmg_registration)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Researcher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM researchers WHERE researcher_id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Researcher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List researchers matching the filter, ordered by name. `name` is a
    /// literal, case-insensitive prefix.
    pub async fn list(
        pool: &PgPool,
        filter: &ResearcherFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Researcher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM researchers \
             WHERE deleted_at IS NULL \
               AND ($1::uuid IS NULL OR institution_id = $1) \
               AND ($2::text IS NULL OR starts_with(lower(name), lower($2))) \
               AND ($3::text IS NULL OR lattes_id = $3) \
             ORDER BY name ASC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Researcher>(&query)
            .bind(filter.institution_id)
            .bind(&filter.name)
            .bind(&filter.lattes_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count live researchers, optionally within one institution.
    pub async fn count(pool: &PgPool, institution_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM researchers \
             WHERE deleted_at IS NULL AND ($1::uuid IS NULL OR institution_id = $1)",
        )
        .bind(institution_id)
        .fetch_one(pool)
        .await
    }

    /// Update a researcher. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateResearcher,
    ) -> Result<Option<Researcher>, sqlx::Error> {
        let query = format!(
            "UPDATE researchers SET \
                name = COALESCE($2, name), \
                lattes_id = COALESCE($3, lattes_id), \
                institution_id = COALESCE($4, institution_id), \
                ufmg_registration = COALESCE($5, ufmg_registration), \
                status = COALESCE($6, status), \
                updated_at = NOW() \
             WHERE researcher_id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Researcher>(&query)
            .bind(input.researcher_id)
            .bind(&input.name)
            .bind(&input.lattes_id)
            .bind(input.institution_id)
            .bind(&input.ufmg_registration)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a researcher. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE researchers SET deleted_at = NOW() \
             WHERE researcher_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- departments --------------------------------------------------------

    /// Link researchers to departments. Existing links are kept.
    pub async fn link_departments(
        pool: &PgPool,
        links: &[DepartmentResearcher],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for link in links {
            sqlx::query(
                "INSERT INTO department_researchers (dep_id, researcher_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(link.dep_id)
            .bind(link.researcher_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    pub async fn departments(pool: &PgPool, researcher_id: DbId) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT d.dep_id, d.org_cod, d.dep_nom, d.dep_des, d.dep_email, d.dep_site, \
                    d.dep_sigla, d.dep_tel, d.created_at, d.updated_at \
             FROM departments d \
             JOIN department_researchers dr ON dr.dep_id = d.dep_id \
             WHERE dr.researcher_id = $1 \
             ORDER BY d.dep_nom",
        )
        .bind(researcher_id)
        .fetch_all(pool)
        .await
    }
}
