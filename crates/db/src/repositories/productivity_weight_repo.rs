//! Repository for the `productivity_weights` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::productivity_weight::{ProductivityWeight, SetProductivityWeight};

const COLUMNS: &str = "weight_id, institution_id, a1, a2, a3, a4, b1, b2, b3, b4, c, sq, \
    book, book_chapter, f1, f2, f3, f4, f5, software, patent_granted, patent_not_granted, \
    report, created_at, updated_at";

pub struct ProductivityWeightRepo;

impl ProductivityWeightRepo {
    /// Store weights atomically, replacing any existing row of the same
    /// institution.
    pub async fn upsert_many(
        pool: &PgPool,
        inputs: &[SetProductivityWeight],
    ) -> Result<Vec<ProductivityWeight>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO productivity_weights \
                (institution_id, a1, a2, a3, a4, b1, b2, b3, b4, c, sq, book, book_chapter, \
                 f1, f2, f3, f4, f5, software, patent_granted, patent_not_granted, report) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     $14, $15, $16, $17, $18, $19, $20, $21, $22) \
             ON CONFLICT (institution_id) DO UPDATE SET \
                a1 = EXCLUDED.a1, a2 = EXCLUDED.a2, a3 = EXCLUDED.a3, a4 = EXCLUDED.a4, \
                b1 = EXCLUDED.b1, b2 = EXCLUDED.b2, b3 = EXCLUDED.b3, b4 = EXCLUDED.b4, \
                c = EXCLUDED.c, sq = EXCLUDED.sq, \
                book = EXCLUDED.book, book_chapter = EXCLUDED.book_chapter, \
                f1 = EXCLUDED.f1, f2 = EXCLUDED.f2, f3 = EXCLUDED.f3, \
                f4 = EXCLUDED.f4, f5 = EXCLUDED.f5, \
                software = EXCLUDED.software, \
                patent_granted = EXCLUDED.patent_granted, \
                patent_not_granted = EXCLUDED.patent_not_granted, \
                report = EXCLUDED.report, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );

        let mut stored = Vec::with_capacity(inputs.len());
        for w in inputs {
            let row = sqlx::query_as::<_, ProductivityWeight>(&query)
                .bind(w.institution_id)
                .bind(w.a1)
                .bind(w.a2)
                .bind(w.a3)
                .bind(w.a4)
                .bind(w.b1)
                .bind(w.b2)
                .bind(w.b3)
                .bind(w.b4)
                .bind(w.c)
                .bind(w.sq)
                .bind(w.book)
                .bind(w.book_chapter)
                .bind(w.f1)
                .bind(w.f2)
                .bind(w.f3)
                .bind(w.f4)
                .bind(w.f5)
                .bind(&w.software)
                .bind(&w.patent_granted)
                .bind(&w.patent_not_granted)
                .bind(&w.report)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(row);
        }

        tx.commit().await?;
        Ok(stored)
    }

    pub async fn list(
        pool: &PgPool,
        institution_id: Option<DbId>,
    ) -> Result<Vec<ProductivityWeight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM productivity_weights \
             WHERE ($1::uuid IS NULL OR institution_id = $1) \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, ProductivityWeight>(&query)
            .bind(institution_id)
            .fetch_all(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, weight_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM productivity_weights WHERE weight_id = $1")
            .bind(weight_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
