//! Session repository: resolves opaque session tokens to the user that owns them.

use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::SessionRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone, Debug)]
pub struct SessionRepository {
    pool_manager: SqlitePoolManager,
}

impl SessionRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    /// Looks up a session by token regardless of expiry; callers check [`SessionRecord::is_expired_at`].
    pub async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, StorageError> {
        let session = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT s.id, s.token, s.user_id, s.expires_at, u.email, u.name
            FROM session s
            JOIN "user" u ON u.id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(session)
    }

    /// Issues a new session for `user_id` valid for `ttl`; returns the token.
    pub async fn create(&self, user_id: &str, ttl: Duration) -> Result<String, StorageError> {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO session (id, token, user_id, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&token)
        .bind(user_id)
        .bind(now + ttl)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;
        info!(user_id = %user_id, "Created session");
        Ok(token)
    }

    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool_manager.pool())
            .await?;
        info!(deleted = result.rows_affected(), "Deleted expired sessions");
        Ok(result.rows_affected())
    }
}
