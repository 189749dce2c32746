//! Repository for per-semester faculty snapshots.

use sqlx::PgPool;

use crate::models::department::SemesterRef;
use crate::models::professor::{NewProfessor, Professor};

const COLUMNS: &str = "professor_id, researcher_id, registration_number, \
    ufmg_registration_number, full_name, gender, status, work_regime, job_class, job_title, \
    job_rank, job_reference_code, academic_degree, organization_entry_date, \
    last_promotion_date, semester_reference";

pub struct ProfessorRepo;

impl ProfessorRepo {
    /// Replace the snapshot of `semester_reference` with `inputs`.
    ///
    /// Each row is linked to the live researcher whose name matches
    /// `full_name` ignoring case, or left unlinked.
    pub async fn replace_semester(
        pool: &PgPool,
        semester_reference: &str,
        inputs: &[NewProfessor],
    ) -> Result<Vec<Professor>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM professors WHERE semester_reference = $1")
            .bind(semester_reference)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO professors \
                (researcher_id, registration_number, ufmg_registration_number, full_name, \
                 gender, status, work_regime, job_class, job_title, job_rank, \
                 job_reference_code, academic_degree, organization_entry_date, \
                 last_promotion_date, semester_reference) \
             VALUES ( \
                (SELECT r.researcher_id FROM researchers r \
                 WHERE lower(r.name) = lower(btrim($3)) AND r.deleted_at IS NULL \
                 ORDER BY r.researcher_id LIMIT 1), \
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );

        let mut stored = Vec::with_capacity(inputs.len());
        for p in inputs {
            let row = sqlx::query_as::<_, Professor>(&query)
                .bind(&p.registration_number)
                .bind(&p.ufmg_registration_number)
                .bind(&p.full_name)
                .bind(&p.gender)
                .bind(&p.status)
                .bind(&p.work_regime)
                .bind(&p.job_class)
                .bind(&p.job_title)
                .bind(&p.job_rank)
                .bind(&p.job_reference_code)
                .bind(&p.academic_degree)
                .bind(p.organization_entry_date)
                .bind(p.last_promotion_date)
                .bind(semester_reference)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// List the snapshot for `semester_reference`, or the most recent one
    /// when `None`.
    pub async fn list(
        pool: &PgPool,
        semester_reference: Option<&str>,
    ) -> Result<Vec<Professor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM professors \
             WHERE semester_reference = COALESCE($1, \
                (SELECT MAX(semester_reference) FROM professors)) \
             ORDER BY full_name"
        );
        sqlx::query_as::<_, Professor>(&query)
            .bind(semester_reference)
            .fetch_all(pool)
            .await
    }

    pub async fn semesters(pool: &PgPool) -> Result<Vec<SemesterRef>, sqlx::Error> {
        sqlx::query_as::<_, SemesterRef>(
            "SELECT DISTINCT split_part(semester_reference, '.', 1) AS year, \
                    split_part(semester_reference, '.', 2) AS semester \
             FROM professors \
             ORDER BY year DESC, semester DESC",
        )
        .fetch_all(pool)
        .await
    }
}
