//! Conversation repository: the append-only message log of signed-in users.
//!
//! Uses SqlitePoolManager and PersistedMessage. Rows are never updated or deleted here;
//! retention is handled outside the service.

use tracing::{info, instrument};

use crate::error::StorageError;
use crate::models::PersistedMessage;
use crate::sqlite_pool::SqlitePoolManager;

const INSERT_MESSAGE: &str = r#"
    INSERT INTO conversation_messages (id, user_id, session_id, role, content, site, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

#[derive(Clone, Debug)]
pub struct ConversationRepository {
    pool_manager: SqlitePoolManager,
}

impl ConversationRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub async fn save(&self, message: &PersistedMessage) -> Result<(), StorageError> {
        sqlx::query(INSERT_MESSAGE)
            .bind(&message.id)
            .bind(&message.user_id)
            .bind(&message.session_id)
            .bind(&message.role)
            .bind(&message.content)
            .bind(&message.site)
            .bind(message.created_at)
            .execute(self.pool_manager.pool())
            .await?;

        info!(
            id = %message.id,
            session_id = %message.session_id,
            role = %message.role,
            "Saved conversation message"
        );
        Ok(())
    }

    /// Writes a user turn and its assistant reply in one transaction, user first.
    #[instrument(skip(self, user, assistant), fields(session_id = %user.session_id))]
    pub async fn save_exchange(
        &self,
        user: &PersistedMessage,
        assistant: &PersistedMessage,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        for message in [user, assistant] {
            sqlx::query(INSERT_MESSAGE)
                .bind(&message.id)
                .bind(&message.user_id)
                .bind(&message.session_id)
                .bind(&message.role)
                .bind(&message.content)
                .bind(&message.site)
                .bind(message.created_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(session_id = %user.session_id, "Saved conversation exchange");
        Ok(())
    }

    /// Most recent `limit` messages of a user, returned oldest first.
    ///
    /// Ties on `created_at` are broken by insertion order so a user turn always precedes
    /// the reply written in the same exchange.
    pub async fn recent_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<PersistedMessage>, StorageError> {
        let mut messages: Vec<PersistedMessage> = sqlx::query_as(
            r#"
            SELECT id, user_id, session_id, role, content, site, created_at
            FROM conversation_messages
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        messages.reverse();
        info!(
            user_id = %user_id,
            count = messages.len(),
            "Retrieved recent messages for user"
        );
        Ok(messages)
    }

    /// All messages of one session, oldest first.
    pub async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<PersistedMessage>, StorageError> {
        let messages = sqlx::query_as(
            r#"
            SELECT id, user_id, session_id, role, content, site, created_at
            FROM conversation_messages
            WHERE session_id = ?
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(messages)
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM conversation_messages")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(total.0)
    }
}
