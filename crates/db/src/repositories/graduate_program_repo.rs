//! Repository for graduate programs and their rosters.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::graduate_program::{
    CreateGraduateProgram, GraduateProgram, GraduateProgramFilter, GraduateProgramSummary,
    NewProgramResearcher, NewProgramStudent, ProgramResearcher, ProgramStudent,
    UpdateGraduateProgram,
};
use crate::models::researcher::CreateResearcher;
use crate::repositories::ResearcherRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "graduate_program_id, code, name, name_en, basic_area, cooperation_project, \
    area, modality, type, rating, institution_id, state, city, region, url_image, acronym, \
    description, visible, site, coordinator, email, start, phone, periodicity, \
    created_at, updated_at";

/// Provides CRUD operations for graduate programs and roster membership.
pub struct GraduateProgramRepo;

impl GraduateProgramRepo {
    /// Insert a batch of programs atomically.
    ///
    /// A duplicate `(code, institution_id)` aborts the whole batch.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateGraduateProgram],
    ) -> Result<Vec<GraduateProgram>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO graduate_programs \
                (graduate_program_id, code, name, name_en, basic_area, cooperation_project, \
                 area, modality, type, rating, institution_id, state, city, region, url_image, \
                 acronym, description, visible, site, coordinator, email, start, phone, \
                 periodicity) \
             VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, \
                 COALESCE($12, 'BA'), COALESCE($13, 'Salvador'), COALESCE($14, 'Nordeste'), \
                 $15, $16, $17, COALESCE($18, false), $19, $20, $21, $22, $23, $24) \
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(inputs.len());
        for p in inputs {
            let row = sqlx::query_as::<_, GraduateProgram>(&query)
                .bind(p.graduate_program_id)
                .bind(&p.code)
                .bind(&p.name)
                .bind(&p.name_en)
                .bind(&p.basic_area)
                .bind(&p.cooperation_project)
                .bind(&p.area)
                .bind(&p.modality)
                .bind(&p.program_type)
                .bind(&p.rating)
                .bind(p.institution_id)
                .bind(&p.state)
                .bind(&p.city)
                .bind(&p.region)
                .bind(&p.url_image)
                .bind(&p.acronym)
                .bind(&p.description)
                .bind(p.visible)
                .bind(&p.site)
                .bind(&p.coordinator)
                .bind(&p.email)
                .bind(p.start)
                .bind(&p.phone)
                .bind(&p.periodicity)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GraduateProgram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM graduate_programs WHERE graduate_program_id = $1");
        sqlx::query_as::<_, GraduateProgram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs with roster counts.
    pub async fn list_with_counts(
        pool: &PgPool,
        filter: &GraduateProgramFilter,
    ) -> Result<Vec<GraduateProgramSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, \
                (SELECT COUNT(*) FROM graduate_program_researchers gpr \
                    JOIN researchers r ON r.researcher_id = gpr.researcher_id \
                    WHERE gpr.graduate_program_id = gp.graduate_program_id \
                      AND gpr.type_ = 'PERMANENTE' AND r.deleted_at IS NULL) AS qtd_permanente, \
                (SELECT COUNT(*) FROM graduate_program_researchers gpr \
                    JOIN researchers r ON r.researcher_id = gpr.researcher_id \
                    WHERE gpr.graduate_program_id = gp.graduate_program_id \
                      AND gpr.type_ = 'COLABORADOR' AND r.deleted_at IS NULL) AS qtd_colaborador, \
                (SELECT COUNT(*) FROM graduate_program_students gps \
                    JOIN researchers r ON r.researcher_id = gps.researcher_id \
                    WHERE gps.graduate_program_id = gp.graduate_program_id \
                      AND r.deleted_at IS NULL) AS qtd_discente \
             FROM graduate_programs gp \
             WHERE ($1::uuid IS NULL OR gp.institution_id = $1) \
               AND ($2::uuid IS NULL OR gp.graduate_program_id = $2) \
             ORDER BY gp.name ASC"
        );
        sqlx::query_as::<_, GraduateProgramSummary>(&query)
            .bind(filter.institution_id)
            .bind(filter.graduate_program_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, institution_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM graduate_programs \
             WHERE ($1::uuid IS NULL OR institution_id = $1)",
        )
        .bind(institution_id)
        .fetch_one(pool)
        .await
    }

    /// Update a program. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        p: &UpdateGraduateProgram,
    ) -> Result<Option<GraduateProgram>, sqlx::Error> {
        let query = format!(
            "UPDATE graduate_programs SET \
                code = COALESCE($2, code), \
                name = COALESCE($3, name), \
                name_en = COALESCE($4, name_en), \
                basic_area = COALESCE($5, basic_area), \
                cooperation_project = COALESCE($6, cooperation_project), \
                area = COALESCE($7, area), \
                modality = COALESCE($8, modality), \
                type = COALESCE($9, type), \
                rating = COALESCE($10, rating), \
                state = COALESCE($11, state), \
                city = COALESCE($12, city), \
                region = COALESCE($13, region), \
                url_image = COALESCE($14, url_image), \
                acronym = COALESCE($15, acronym), \
                description = COALESCE($16, description), \
                site = COALESCE($17, site), \
                coordinator = COALESCE($18, coordinator), \
                email = COALESCE($19, email), \
                start = COALESCE($20, start), \
                phone = COALESCE($21, phone), \
                periodicity = COALESCE($22, periodicity), \
                updated_at = NOW() \
             WHERE graduate_program_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GraduateProgram>(&query)
            .bind(p.graduate_program_id)
            .bind(&p.code)
            .bind(&p.name)
            .bind(&p.name_en)
            .bind(&p.basic_area)
            .bind(&p.cooperation_project)
            .bind(&p.area)
            .bind(&p.modality)
            .bind(&p.program_type)
            .bind(&p.rating)
            .bind(&p.state)
            .bind(&p.city)
            .bind(&p.region)
            .bind(&p.url_image)
            .bind(&p.acronym)
            .bind(&p.description)
            .bind(&p.site)
            .bind(&p.coordinator)
            .bind(&p.email)
            .bind(p.start)
            .bind(&p.phone)
            .bind(&p.periodicity)
            .fetch_optional(pool)
            .await
    }

    /// Flip the `visible` flag, returning the updated row.
    pub async fn toggle_visibility(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GraduateProgram>, sqlx::Error> {
        let query = format!(
            "UPDATE graduate_programs SET visible = NOT visible, updated_at = NOW() \
             WHERE graduate_program_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GraduateProgram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a program together with its rosters.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM graduate_program_students WHERE graduate_program_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM graduate_program_researchers WHERE graduate_program_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM graduate_programs WHERE graduate_program_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -- researchers --------------------------------------------------------

    /// Add researchers to program rosters atomically.
    pub async fn add_researchers(
        pool: &PgPool,
        members: &[NewProgramResearcher],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for m in members {
            sqlx::query(
                "INSERT INTO graduate_program_researchers \
                    (graduate_program_id, researcher_id, type_, years) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(m.graduate_program_id)
            .bind(m.researcher_id)
            .bind(m.member_type.as_str())
            .bind(&m.years)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Replace type and years of existing roster entries.
    pub async fn update_researchers(
        pool: &PgPool,
        members: &[NewProgramResearcher],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for m in members {
            let result = sqlx::query(
                "UPDATE graduate_program_researchers SET type_ = $3, years = $4 \
                 WHERE graduate_program_id = $1 AND researcher_id = $2",
            )
            .bind(m.graduate_program_id)
            .bind(m.researcher_id)
            .bind(m.member_type.as_str())
            .bind(&m.years)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_researchers(
        pool: &PgPool,
        graduate_program_id: DbId,
        member_type: Option<&str>,
    ) -> Result<Vec<ProgramResearcher>, sqlx::Error> {
        sqlx::query_as::<_, ProgramResearcher>(
            "SELECT gpr.graduate_program_id, gpr.researcher_id, r.name, r.lattes_id, \
                    gpr.type_, gpr.years \
             FROM graduate_program_researchers gpr \
             JOIN researchers r ON r.researcher_id = gpr.researcher_id \
             WHERE gpr.graduate_program_id = $1 AND r.deleted_at IS NULL \
               AND ($2::text IS NULL OR gpr.type_ = $2) \
             ORDER BY r.name",
        )
        .bind(graduate_program_id)
        .bind(member_type)
        .fetch_all(pool)
        .await
    }

    pub async fn remove_researcher(
        pool: &PgPool,
        graduate_program_id: DbId,
        researcher_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM graduate_program_researchers \
             WHERE graduate_program_id = $1 AND researcher_id = $2",
        )
        .bind(graduate_program_id)
        .bind(researcher_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- students -----------------------------------------------------------

    /// Add students to program rosters atomically.
    ///
    /// Each student is matched to a researcher by Lattes id; unknown
    /// students are registered as researchers first.
    pub async fn add_students(
        pool: &PgPool,
        students: &[NewProgramStudent],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for s in students {
            let existing: Option<DbId> = sqlx::query_scalar(
                "SELECT researcher_id FROM researchers \
                 WHERE lattes_id = $1 AND deleted_at IS NULL",
            )
            .bind(&s.lattes_id)
            .fetch_optional(&mut *tx)
            .await?;

            let researcher_id = match existing {
                Some(id) => id,
                None => {
                    let input = CreateResearcher {
                        researcher_id: None,
                        name: s.name.clone().unwrap_or_else(|| s.lattes_id.clone()),
                        lattes_id: s.lattes_id.clone(),
                        institution_id: s.institution_id,
                        ufmg_registration: None,
                    };
                    ResearcherRepo::insert_inner(&mut tx, &input)
                        .await?
                        .researcher_id
                }
            };

            sqlx::query(
                "INSERT INTO graduate_program_students (graduate_program_id, researcher_id, years) \
                 VALUES ($1, $2, $3)",
            )
            .bind(s.graduate_program_id)
            .bind(researcher_id)
            .bind(&s.years)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Replace the years of existing student entries, matched by Lattes id.
    pub async fn update_students(
        pool: &PgPool,
        students: &[NewProgramStudent],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for s in students {
            let result = sqlx::query(
                "UPDATE graduate_program_students gps SET years = $3 \
                 FROM researchers r \
                 WHERE r.researcher_id = gps.researcher_id \
                   AND gps.graduate_program_id = $1 AND r.lattes_id = $2",
            )
            .bind(s.graduate_program_id)
            .bind(&s.lattes_id)
            .bind(&s.years)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_students(
        pool: &PgPool,
        graduate_program_id: DbId,
    ) -> Result<Vec<ProgramStudent>, sqlx::Error> {
        sqlx::query_as::<_, ProgramStudent>(
            "SELECT gps.graduate_program_id, gps.researcher_id, r.name, r.lattes_id, gps.years \
             FROM graduate_program_students gps \
             JOIN researchers r ON r.researcher_id = gps.researcher_id \
             WHERE gps.graduate_program_id = $1 AND r.deleted_at IS NULL \
             ORDER BY r.name",
        )
        .bind(graduate_program_id)
        .fetch_all(pool)
        .await
    }

    pub async fn remove_student(
        pool: &PgPool,
        graduate_program_id: DbId,
        researcher_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM graduate_program_students \
             WHERE graduate_program_id = $1 AND researcher_id = $2",
        )
        .bind(graduate_program_id)
        .bind(researcher_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
