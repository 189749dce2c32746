//! Repository for departments, their researchers and discipline offerings.

use sqlx::PgPool;
use simcc_core::types::{DbId, DepId};

use crate::models::department::{
    CreateDepartment, Department, Discipline, NewDiscipline, SemesterRef, UpdateDepartment,
};
use crate::models::researcher::{DepartmentResearcher, Researcher};

const COLUMNS: &str = "dep_id, org_cod, dep_nom, dep_des, dep_email, dep_site, dep_sigla, \
    dep_tel, created_at, updated_at";

const DISCIPLINE_COLUMNS: &str = "discipline_id, dep_id, semester, department, \
    academic_activity_code, academic_activity_name, academic_activity_ch, demanding_courses, \
    oft, offering_id, available_slots, occupied_slots, percent_occupied_slots, schedule, \
    language, researcher_ids, researcher_names, workloads, status";

/// Provides CRUD operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    pub async fn create(pool: &PgPool, input: &CreateDepartment) -> Result<Department, sqlx::Error> {
        let query = format!(
            "INSERT INTO departments \
                (dep_id, org_cod, dep_nom, dep_des, dep_email, dep_site, dep_sigla, dep_tel) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(input.dep_id)
            .bind(&input.org_cod)
            .bind(&input.dep_nom)
            .bind(&input.dep_des)
            .bind(&input.dep_email)
            .bind(&input.dep_site)
            .bind(&input.dep_sigla)
            .bind(&input.dep_tel)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, dep_id: DepId) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE dep_id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(dep_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, dep_id: Option<DepId>) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM departments \
             WHERE ($1::int IS NULL OR dep_id = $1) \
             ORDER BY dep_nom"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(dep_id)
            .fetch_all(pool)
            .await
    }

    /// Update a department. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        dep_id: DepId,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET \
                org_cod = COALESCE($2, org_cod), \
                dep_nom = COALESCE($3, dep_nom), \
                dep_des = COALESCE($4, dep_des), \
                dep_email = COALESCE($5, dep_email), \
                dep_site = COALESCE($6, dep_site), \
                dep_sigla = COALESCE($7, dep_sigla), \
                dep_tel = COALESCE($8, dep_tel), \
                updated_at = NOW() \
             WHERE dep_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(dep_id)
            .bind(&input.org_cod)
            .bind(&input.dep_nom)
            .bind(&input.dep_des)
            .bind(&input.dep_email)
            .bind(&input.dep_site)
            .bind(&input.dep_sigla)
            .bind(&input.dep_tel)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department. Researcher, technician and discipline links
    /// cascade with it.
    pub async fn delete(pool: &PgPool, dep_id: DepId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE dep_id = $1")
            .bind(dep_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- researchers --------------------------------------------------------

    /// Link researchers to departments. Existing links are left untouched.
    pub async fn add_researchers(
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

    pub async fn list_researchers(
        pool: &PgPool,
        dep_id: DepId,
    ) -> Result<Vec<Researcher>, sqlx::Error> {
        sqlx::query_as::<_, Researcher>(
            "SELECT r.researcher_id, r.name, r.lattes_id, r.institution_id, \
                    r.ufmg_registration, r.status, r.created_at, r.updated_at \
             FROM department_researchers dr \
             JOIN researchers r ON r.researcher_id = dr.researcher_id \
             WHERE dr.dep_id = $1 AND r.deleted_at IS NULL \
             ORDER BY r.name",
        )
        .bind(dep_id)
        .fetch_all(pool)
        .await
    }

    pub async fn remove_researcher(
        pool: &PgPool,
        dep_id: DepId,
        researcher_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM department_researchers WHERE dep_id = $1 AND researcher_id = $2",
        )
        .bind(dep_id)
        .bind(researcher_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- disciplines --------------------------------------------------------

    /// Insert discipline offerings atomically.
    ///
    /// Professors are matched to researchers by institutional registration;
    /// unmatched professors keep their name with a `NULL` id slot.
    pub async fn add_disciplines(
        pool: &PgPool,
        disciplines: &[NewDiscipline],
    ) -> Result<Vec<Discipline>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO disciplines \
                (dep_id, semester, department, academic_activity_code, academic_activity_name, \
                 academic_activity_ch, demanding_courses, oft, offering_id, available_slots, \
                 occupied_slots, percent_occupied_slots, schedule, language, researcher_ids, \
                 researcher_names, workloads, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                 $17, $18) \
             RETURNING {DISCIPLINE_COLUMNS}"
        );

        let mut created = Vec::with_capacity(disciplines.len());
        for d in disciplines {
            let mut ids: Vec<Option<DbId>> = Vec::with_capacity(d.professors.len());
            for professor in &d.professors {
                let id: Option<DbId> = sqlx::query_scalar(
                    "SELECT researcher_id FROM researchers \
                     WHERE ufmg_registration = $1 AND deleted_at IS NULL \
                     LIMIT 1",
                )
                .bind(&professor.ufmg_id)
                .fetch_optional(&mut *tx)
                .await?;
                ids.push(id);
            }
            let names: Vec<&str> = d.professors.iter().map(|p| p.name.as_str()).collect();
            let workloads: Vec<&str> =
                d.professors.iter().map(|p| p.responsibility.as_str()).collect();

            let row = sqlx::query_as::<_, Discipline>(&query)
                .bind(d.dep_id)
                .bind(&d.semester)
                .bind(&d.department)
                .bind(&d.academic_activity_code)
                .bind(&d.academic_activity_name)
                .bind(&d.academic_activity_ch)
                .bind(&d.demanding_courses)
                .bind(&d.oft)
                .bind(&d.offering_id)
                .bind(&d.available_slots)
                .bind(&d.occupied_slots)
                .bind(&d.percent_occupied_slots)
                .bind(&d.schedule)
                .bind(&d.language)
                .bind(&ids)
                .bind(&names)
                .bind(&workloads)
                .bind(&d.status)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn list_disciplines(
        pool: &PgPool,
        dep_id: Option<DepId>,
    ) -> Result<Vec<Discipline>, sqlx::Error> {
        let query = format!(
            "SELECT {DISCIPLINE_COLUMNS} FROM disciplines \
             WHERE ($1::int IS NULL OR dep_id = $1) \
             ORDER BY semester DESC, academic_activity_code"
        );
        sqlx::query_as::<_, Discipline>(&query)
            .bind(dep_id)
            .fetch_all(pool)
            .await
    }

    /// Distinct terms with offerings, newest first.
    pub async fn discipline_semesters(
        pool: &PgPool,
        dep_id: Option<DepId>,
    ) -> Result<Vec<SemesterRef>, sqlx::Error> {
        sqlx::query_as::<_, SemesterRef>(
            "SELECT DISTINCT split_part(semester, '.', 1) AS year, \
                    split_part(semester, '.', 2) AS semester \
             FROM disciplines \
             WHERE ($1::int IS NULL OR dep_id = $1) \
             ORDER BY year DESC, semester DESC",
        )
        .bind(dep_id)
        .fetch_all(pool)
        .await
    }
}
