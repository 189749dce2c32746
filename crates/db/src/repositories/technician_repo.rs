//! Repository for technician snapshots, roles and department links.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::department::{Department, SemesterRef};
use crate::models::technician::{DepartmentTechnician, NewTechnician, Technician, TechnicianRole};

const COLUMNS: &str = "technician_id, registration_number, ufmg_registration_number, full_name, \
    gender, status_code, work_regime, job_class, job_title, job_rank, job_reference_code, \
    academic_degree, department_name, academic_unit, organization_entry_date, \
    last_promotion_date, semester_reference";

/// Provides access to per-semester technician snapshots.
pub struct TechnicianRepo;

impl TechnicianRepo {
    /// Insert a batch of technicians atomically.
    ///
    /// Re-importing the same registration for the same semester refreshes
    /// the existing row instead of failing.
    pub async fn upsert_many(
        pool: &PgPool,
        inputs: &[NewTechnician],
    ) -> Result<Vec<Technician>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO technicians \
                (registration_number, ufmg_registration_number, full_name, gender, status_code, \
                 work_regime, job_class, job_title, job_rank, job_reference_code, \
                 academic_degree, department_name, academic_unit, organization_entry_date, \
                 last_promotion_date, semester_reference) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             ON CONFLICT (registration_number, semester_reference) DO UPDATE SET \
                ufmg_registration_number = EXCLUDED.ufmg_registration_number, \
                full_name = EXCLUDED.full_name, \
                gender = EXCLUDED.gender, \
                status_code = EXCLUDED.status_code, \
                work_regime = EXCLUDED.work_regime, \
                job_class = EXCLUDED.job_class, \
                job_title = EXCLUDED.job_title, \
                job_rank = EXCLUDED.job_rank, \
                job_reference_code = EXCLUDED.job_reference_code, \
                academic_degree = EXCLUDED.academic_degree, \
                department_name = EXCLUDED.department_name, \
                academic_unit = EXCLUDED.academic_unit, \
                organization_entry_date = EXCLUDED.organization_entry_date, \
                last_promotion_date = EXCLUDED.last_promotion_date \
             RETURNING {COLUMNS}"
        );

        let mut stored = Vec::with_capacity(inputs.len());
        for t in inputs {
            let row = sqlx::query_as::<_, Technician>(&query)
                .bind(&t.registration_number)
                .bind(&t.ufmg_registration_number)
                .bind(&t.full_name)
                .bind(&t.gender)
                .bind(&t.status_code)
                .bind(&t.work_regime)
                .bind(&t.job_class)
                .bind(&t.job_title)
                .bind(&t.job_rank)
                .bind(&t.job_reference_code)
                .bind(&t.academic_degree)
                .bind(&t.department_name)
                .bind(&t.academic_unit)
                .bind(t.organization_entry_date)
                .bind(t.last_promotion_date)
                .bind(&t.semester_reference)
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
    ) -> Result<Vec<Technician>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM technicians \
             WHERE semester_reference = COALESCE($1, \
                (SELECT MAX(semester_reference) FROM technicians)) \
             ORDER BY full_name"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(semester_reference)
            .fetch_all(pool)
            .await
    }

    /// Distinct imported terms, newest first.
    pub async fn semesters(pool: &PgPool) -> Result<Vec<SemesterRef>, sqlx::Error> {
        sqlx::query_as::<_, SemesterRef>(
            "SELECT DISTINCT split_part(semester_reference, '.', 1) AS year, \
                    split_part(semester_reference, '.', 2) AS semester \
             FROM technicians \
             ORDER BY year DESC, semester DESC",
        )
        .fetch_all(pool)
        .await
    }

    // -- roles --------------------------------------------------------------

    pub async fn add_roles(pool: &PgPool, roles: &[TechnicianRole]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for r in roles {
            sqlx::query(
                "INSERT INTO technician_roles (technician_id, role) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(r.technician_id)
            .bind(&r.role)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    pub async fn list_roles(pool: &PgPool) -> Result<Vec<TechnicianRole>, sqlx::Error> {
        sqlx::query_as::<_, TechnicianRole>(
            "SELECT technician_id, role FROM technician_roles ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }

    // -- departments --------------------------------------------------------

    pub async fn link_departments(
        pool: &PgPool,
        links: &[DepartmentTechnician],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for link in links {
            sqlx::query(
                "INSERT INTO department_technicians (dep_id, technician_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(link.dep_id)
            .bind(link.technician_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Remove department links. Returns the number of links deleted.
    pub async fn unlink_departments(
        pool: &PgPool,
        links: &[DepartmentTechnician],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut removed = 0;
        for link in links {
            let result = sqlx::query(
                "DELETE FROM department_technicians WHERE dep_id = $1 AND technician_id = $2",
            )
            .bind(link.dep_id)
            .bind(link.technician_id)
            .execute(&mut *tx)
            .await?;
            removed += result.rows_affected();
        }
        tx.commit().await?;
        Ok(removed)
    }

    pub async fn departments(
        pool: &PgPool,
        technician_id: DbId,
    ) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            "SELECT d.dep_id, d.org_cod, d.dep_nom, d.dep_des, d.dep_email, d.dep_site, \
                    d.dep_sigla, d.dep_tel, d.created_at, d.updated_at \
             FROM department_technicians dt \
             JOIN departments d ON d.dep_id = dt.dep_id \
             WHERE dt.technician_id = $1 \
             ORDER BY d.dep_nom",
        )
        .bind(technician_id)
        .fetch_all(pool)
        .await
    }
}
