//! Seams to the external collaborators the relay consults but does not own.

use async_trait::async_trait;
use edge_core::{ConversationTurn, ProductSummary, Result, Role};

/// Credentials presented by the caller. An absent token means an anonymous visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
        }
    }
}

/// Identity behind a valid session, or a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A user's organization and their role in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub organization_id: String,
    pub organization_name: String,
    pub role: Role,
}

/// One completed exchange to append to the persistent log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    pub user_id: String,
    pub session_key: String,
    pub site: String,
    pub user_message: String,
    pub reply: String,
}

/// Validates session credentials.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` for missing, unknown or expired credentials. `Err` only when the store itself fails.
    async fn get_session(&self, credentials: &Credentials) -> Result<Option<UserIdentity>>;
}

/// Read access to users, memberships and subscriptions.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserIdentity>>;

    /// Earliest membership of the user, if any.
    async fn first_membership(&self, user_id: &str) -> Result<Option<Membership>>;

    /// Active subscriptions to active products, ordered by product name.
    async fn active_products(&self, organization_id: &str) -> Result<Vec<ProductSummary>>;
}

/// Append-only log of authenticated conversations.
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Most recent `limit` turns of the user, oldest first.
    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationTurn>>;

    /// Appends the user turn, then the reply.
    async fn append_exchange(&self, exchange: &NewExchange) -> Result<()>;
}
