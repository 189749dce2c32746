//! Repository for the `notifications` table.

use sqlx::PgPool;
use simcc_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str = "notification_id, user_id, sender_id, type, data, read, created_at, read_at";

pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &PgPool,
        sender_id: Option<DbId>,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, sender_id, type, data) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(sender_id)
            .bind(input.notification_type.as_str())
            .bind(&input.data)
            .fetch_one(pool)
            .await
    }

    /// A user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a notification owned by `user_id` as read. Idempotent.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE, read_at = COALESCE(read_at, NOW()) \
             WHERE notification_id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE notification_id = $1 AND user_id = $2")
                .bind(notification_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
