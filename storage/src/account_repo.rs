//! Account repository: read models for users, organizations, products and subscriptions,
//! plus the few writes the admin surface and provisioning need.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{
    MembershipRecord, OrganizationRecord, ProductRecord, SubscribedProduct, SubscriptionRecord,
    UserRecord,
};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone, Debug)]
pub struct AccountRepository {
    pool_manager: SqlitePoolManager,
}

impl AccountRepository {
    pub fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, name, email, email_verified, created_at, updated_at FROM "user" WHERE id = ?"#,
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    /// The user's earliest organization membership, if any.
    pub async fn first_membership(
        &self,
        user_id: &str,
    ) -> Result<Option<MembershipRecord>, StorageError> {
        let membership = sqlx::query_as::<_, MembershipRecord>(
            r#"
            SELECT m.organization_id, o.name AS organization_name, m.role
            FROM member m
            JOIN organization o ON o.id = m.organization_id
            WHERE m.user_id = ?
            ORDER BY m.created_at ASC, m.id ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(membership)
    }

    /// Active subscriptions of an organization whose product is also active, by product name.
    pub async fn active_subscriptions(
        &self,
        organization_id: &str,
    ) -> Result<Vec<SubscribedProduct>, StorageError> {
        let products = sqlx::query_as::<_, SubscribedProduct>(
            r#"
            SELECT p.id AS product_id, p.name AS product_name, ps.plan, ps.status
            FROM product_subscription ps
            JOIN product p ON p.id = ps.product_id
            WHERE ps.organization_id = ? AND ps.status = 'active' AND p.active = 1
            ORDER BY p.name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(products)
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, StorageError> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, email_verified, created_at, updated_at
            FROM "user"
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        info!(count = users.len(), "Listed users");
        Ok(users)
    }

    pub async fn list_organizations(&self) -> Result<Vec<OrganizationRecord>, StorageError> {
        let organizations = sqlx::query_as::<_, OrganizationRecord>(
            r#"
            SELECT o.id, o.name, o.slug, o.created_at, o.updated_at,
                   COUNT(m.user_id) AS member_count
            FROM organization o
            LEFT JOIN member m ON o.id = m.organization_id
            GROUP BY o.id, o.name, o.slug, o.created_at, o.updated_at
            ORDER BY o.created_at DESC, o.rowid DESC
            "#,
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        info!(count = organizations.len(), "Listed organizations");
        Ok(organizations)
    }

    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, StorageError> {
        let products = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, name, slug, description, icon, url, active, created_at, updated_at
            FROM product
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(products)
    }

    pub async fn list_active_products(&self) -> Result<Vec<ProductRecord>, StorageError> {
        let products = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, name, slug, description, icon, url, active, created_at, updated_at
            FROM product
            WHERE active = 1
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(products)
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, StorageError> {
        let subscriptions = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT ps.id, ps.plan, ps.status, ps.created_at, ps.updated_at,
                   ps.billing_id, ps.trial_ends_at, ps.current_period_end,
                   o.name AS organization_name, o.slug AS organization_slug,
                   p.name AS product_name, p.icon AS product_icon, p.slug AS product_slug
            FROM product_subscription ps
            JOIN organization o ON ps.organization_id = o.id
            JOIN product p ON ps.product_id = p.id
            ORDER BY ps.created_at DESC, ps.rowid DESC
            "#,
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        info!(count = subscriptions.len(), "Listed subscriptions");
        Ok(subscriptions)
    }

    /// Toggles a product's `active` flag. Returns false when no such product exists.
    #[instrument(skip(self))]
    pub async fn set_product_active(
        &self,
        product_id: &str,
        active: bool,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE product SET active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(Utc::now())
            .bind(product_id)
            .execute(self.pool_manager.pool())
            .await?;
        info!(
            product_id = %product_id,
            active,
            rows_affected = result.rows_affected(),
            "Updated product status"
        );
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_user(
        &self,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<UserRecord, StorageError> {
        let now = Utc::now();
        sqlx::query(
            r#"INSERT INTO "user" (id, name, email, email_verified, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?)"#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(now)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;
        self.find_user(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("user {}", id)))
    }

    pub async fn create_organization(
        &self,
        id: &str,
        name: &str,
        slug: &str,
    ) -> Result<(), StorageError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO organization (id, name, slug, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(now)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    pub async fn add_member(
        &self,
        organization_id: &str,
        user_id: &str,
        role: &str,
    ) -> Result<String, StorageError> {
        let id = format!("member_{}", Uuid::new_v4());
        sqlx::query(
            "INSERT INTO member (id, organization_id, user_id, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(organization_id)
        .bind(user_id)
        .bind(role)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(id)
    }

    pub async fn create_product(
        &self,
        id: &str,
        name: &str,
        slug: &str,
        active: bool,
    ) -> Result<(), StorageError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO product (id, name, slug, active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(active)
        .bind(now)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    pub async fn create_subscription(
        &self,
        organization_id: &str,
        product_id: &str,
        plan: &str,
        status: &str,
    ) -> Result<String, StorageError> {
        let id = format!("sub_{}", Uuid::new_v4());
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO product_subscription (id, organization_id, product_id, plan, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(organization_id)
        .bind(product_id)
        .bind(plan)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(id)
    }
}
