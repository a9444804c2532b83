//! Persisted conversation message.
//!
//! Maps to the `conversation_messages` table and is used by ConversationRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One durable row of the message log. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMessage {
    pub id: String,
    pub user_id: Option<String>,
    pub session_id: String,
    /// `user` or `assistant` (enforced by a CHECK constraint).
    pub role: String,
    pub content: String,
    pub site: String,
    pub created_at: DateTime<Utc>,
}

impl PersistedMessage {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(
        user_id: Option<String>,
        session_id: impl Into<String>,
        role: impl Into<String>,
        content: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            session_id: session_id.into(),
            role: role.into(),
            content: content.into(),
            site: site.into(),
            created_at: Utc::now(),
        }
    }
}
