//! Builds the per-request [`UserContext`] of a signed-in user.

use std::sync::Arc;

use edge_core::{EdgeError, Result, UserContext};
use tracing::{debug, instrument};

use crate::collaborators::AccountStore;
use crate::policy::is_site_admin;

/// Read-only resolver over an [`AccountStore`]. Nothing is cached across calls.
#[derive(Clone)]
pub struct UserContextResolver {
    accounts: Arc<dyn AccountStore>,
}

impl UserContextResolver {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// `Err(NotFound)` when no user row matches; store failures come back as `Err(Upstream)`.
    /// Users without a membership get no organization, no products and role `user`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, user_id: &str) -> Result<UserContext> {
        let user = self
            .accounts
            .find_user(user_id)
            .await?
            .ok_or_else(|| EdgeError::NotFound(format!("user {}", user_id)))?;

        let membership = self.accounts.first_membership(&user.id).await?;
        let products = match &membership {
            Some(m) => self.accounts.active_products(&m.organization_id).await?,
            None => Vec::new(),
        };
        let is_admin = is_site_admin(&user.id, &user.email);

        debug!(
            user_id = %user.id,
            has_organization = membership.is_some(),
            product_count = products.len(),
            is_admin,
            "step: user context resolved"
        );

        let (role, organization_id, organization_name) = match membership {
            Some(m) => (
                Some(m.role),
                Some(m.organization_id),
                Some(m.organization_name),
            ),
            None => (None, None, None),
        };
        Ok(UserContext::new(
            user.id,
            user.email,
            user.name,
            role,
            organization_id,
            organization_name,
            products,
            is_admin,
        ))
    }
}
