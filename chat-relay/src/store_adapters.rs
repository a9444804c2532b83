//! Collaborator traits implemented over the SQLite repositories.

use async_trait::async_trait;
use chrono::Utc;
use edge_core::{
    ConversationTurn, EdgeError, ProductSummary, Result, Role, Subsystem, TurnRole,
};
use storage::{
    AccountRepository, ConversationRepository, PersistedMessage, SessionRepository, StorageError,
};
use tracing::warn;

use crate::collaborators::{
    AccountStore, Credentials, Membership, MessageLog, NewExchange, SessionStore, UserIdentity,
};

fn database(err: StorageError) -> EdgeError {
    EdgeError::upstream(Subsystem::Database, err)
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn get_session(&self, credentials: &Credentials) -> Result<Option<UserIdentity>> {
        let Some(token) = credentials.session_token.as_deref() else {
            return Ok(None);
        };
        let session = self
            .find_by_token(token)
            .await
            .map_err(|e| EdgeError::upstream(Subsystem::SessionStore, e))?;
        Ok(session
            .filter(|s| !s.is_expired_at(Utc::now()))
            .map(|s| UserIdentity {
                id: s.user_id,
                email: s.email,
                name: s.name,
            }))
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserIdentity>> {
        let user = AccountRepository::find_user(self, user_id)
            .await
            .map_err(database)?;
        Ok(user.map(|u| UserIdentity {
            id: u.id,
            email: u.email,
            name: u.name,
        }))
    }

    async fn first_membership(&self, user_id: &str) -> Result<Option<Membership>> {
        let membership = AccountRepository::first_membership(self, user_id)
            .await
            .map_err(database)?;
        Ok(membership.map(|m| Membership {
            organization_id: m.organization_id,
            organization_name: m.organization_name,
            role: Role::from_membership(&m.role),
        }))
    }

    async fn active_products(&self, organization_id: &str) -> Result<Vec<ProductSummary>> {
        let rows = self
            .active_subscriptions(organization_id)
            .await
            .map_err(database)?;
        Ok(rows
            .into_iter()
            .map(|p| ProductSummary {
                id: p.product_id,
                name: p.product_name,
                plan: p.plan,
                status: p.status,
            })
            .collect())
    }
}

#[async_trait]
impl MessageLog for ConversationRepository {
    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationTurn>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = ConversationRepository::recent_for_user(self, user_id, limit)
            .await
            .map_err(database)?;
        let mut turns = Vec::with_capacity(rows.len());
        for row in rows {
            match row.role.parse::<TurnRole>() {
                Ok(role) => turns.push(ConversationTurn {
                    role,
                    content: row.content,
                }),
                Err(e) => warn!(message_id = %row.id, error = %e, "Skipping message with unknown role"),
            }
        }
        Ok(turns)
    }

    async fn append_exchange(&self, exchange: &NewExchange) -> Result<()> {
        let user = PersistedMessage::new(
            Some(exchange.user_id.clone()),
            &exchange.session_key,
            TurnRole::User.as_str(),
            &exchange.user_message,
            &exchange.site,
        );
        let assistant = PersistedMessage::new(
            Some(exchange.user_id.clone()),
            &exchange.session_key,
            TurnRole::Assistant.as_str(),
            &exchange.reply,
            &exchange.site,
        );
        self.save_exchange(&user, &assistant)
            .await
            .map_err(database)
    }
}
