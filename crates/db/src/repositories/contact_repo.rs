//! Repositories for newsletter subscribers and feedback.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::contact::{CreateFeedback, Feedback, NewsletterSubscriber};

const FEEDBACK_COLUMNS: &str = "feedback_id, name, email, rating, description, created_at";

pub struct NewsletterRepo;

impl NewsletterRepo {
    /// Subscribe `email`. A repeated address violates
    /// `uq_newsletter_subscribers_email`.
    pub async fn subscribe(
        pool: &PgPool,
        email: &str,
    ) -> Result<NewsletterSubscriber, sqlx::Error> {
        sqlx::query_as::<_, NewsletterSubscriber>(
            "INSERT INTO newsletter_subscribers (email) VALUES ($1) \
             RETURNING email, subscribed_at",
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<NewsletterSubscriber>, sqlx::Error> {
        sqlx::query_as::<_, NewsletterSubscriber>(
            "SELECT email, subscribed_at FROM newsletter_subscribers ORDER BY subscribed_at",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn unsubscribe(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (name, email, rating, description) \
             VALUES ($1, $2, $3, $4) RETURNING {FEEDBACK_COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.rating)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!("SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY created_at DESC");
        sqlx::query_as::<_, Feedback>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE feedback_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
