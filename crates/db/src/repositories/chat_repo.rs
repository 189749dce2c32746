//! Repository for chats, participants and messages.

use sqlx::{PgPool, Postgres, Transaction};
use simcc_core::chat::private_chat_key;
use simcc_core::types::DbId;

use crate::models::chat::{Chat, ChatMessage, ChatWithUsers};

const COLUMNS: &str = "c.chat_id, c.chat_name, c.is_group, c.created_at";

const MESSAGE_COLUMNS: &str = "message_id, chat_id, sender_id, content, created_at";

pub struct ChatRepo;

impl ChatRepo {
    /// Find the private chat shared by `a` and `b`, in either order.
    pub async fn find_private(pool: &PgPool, a: DbId, b: DbId) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chats c WHERE c.private_key = $1");
        sqlx::query_as::<_, Chat>(&query)
            .bind(private_chat_key(a, b))
            .fetch_optional(pool)
            .await
    }

    /// Return the private chat between `creator` and `peer`, creating it
    /// when it does not exist yet. The flag is `true` when this call
    /// created it.
    ///
    /// Concurrent first contacts converge on one chat: the loser of the
    /// `uq_chats_private_key` race inserts nothing and reads the winner's row.
    pub async fn find_or_create_private(
        pool: &PgPool,
        chat_name: &str,
        creator: DbId,
        peer: DbId,
    ) -> Result<(Chat, bool), sqlx::Error> {
        if let Some(chat) = Self::find_private(pool, creator, peer).await? {
            return Ok((chat, false));
        }

        let mut tx = pool.begin().await?;
        let inserted = sqlx::query_as::<_, Chat>(
            "INSERT INTO chats (chat_name, is_group, private_key) VALUES ($1, FALSE, $2) \
             ON CONFLICT (private_key) DO NOTHING \
             RETURNING chat_id, chat_name, is_group, created_at",
        )
        .bind(chat_name)
        .bind(private_chat_key(creator, peer))
        .fetch_optional(&mut *tx)
        .await?;

        let Some(chat) = inserted else {
            tx.rollback().await?;
            let chat = Self::find_private(pool, creator, peer)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            return Ok((chat, false));
        };

        Self::insert_participants(&mut tx, chat.chat_id, creator, &[creator, peer]).await?;
        tx.commit().await?;
        Ok((chat, true))
    }

    /// Create a group chat and its participants in one transaction.
    /// `creator` is flagged as chat admin.
    pub async fn create_group(
        pool: &PgPool,
        chat_name: &str,
        creator: DbId,
        participants: &[DbId],
    ) -> Result<Chat, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let chat = sqlx::query_as::<_, Chat>(
            "INSERT INTO chats (chat_name, is_group) VALUES ($1, TRUE) \
             RETURNING chat_id, chat_name, is_group, created_at",
        )
        .bind(chat_name)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_participants(&mut tx, chat.chat_id, creator, participants).await?;
        tx.commit().await?;
        Ok(chat)
    }

    async fn insert_participants(
        tx: &mut Transaction<'_, Postgres>,
        chat_id: DbId,
        creator: DbId,
        participants: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for user_id in participants {
            sqlx::query(
                "INSERT INTO chat_participants (chat_id, user_id, is_admin) VALUES ($1, $2, $3) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(chat_id)
            .bind(user_id)
            .bind(*user_id == creator)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Chats `user_id` takes part in, with all participant ids.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ChatWithUsers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chats c \
             JOIN chat_participants me ON me.chat_id = c.chat_id AND me.user_id = $1 \
             ORDER BY c.created_at DESC"
        );
        let chats = sqlx::query_as::<_, Chat>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(chats.len());
        for chat in chats {
            let users = Self::participants(pool, chat.chat_id).await?;
            result.push(ChatWithUsers { chat, users });
        }
        Ok(result)
    }

    pub async fn participants(pool: &PgPool, chat_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM chat_participants WHERE chat_id = $1 ORDER BY user_id",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    // -- messages -----------------------------------------------------------

    pub async fn insert_message(
        pool: &PgPool,
        chat_id: DbId,
        sender_id: DbId,
        content: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (chat_id, sender_id, content) VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(chat_id)
            .bind(sender_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Messages of a chat, oldest first.
    pub async fn messages(pool: &PgPool, chat_id: DbId) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages \
             WHERE chat_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(chat_id)
            .fetch_all(pool)
            .await
    }
}
