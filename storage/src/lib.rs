//! Storage crate: durable state of the chat service behind sqlx/SQLite.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – PersistedMessage, account/product/subscription/session records
//! - [`schema`] – Idempotent table creation
//! - [`conversation_repo`] – ConversationRepository (persistent message log)
//! - [`account_repo`] – AccountRepository (users, organizations, products, subscriptions)
//! - [`session_repo`] – SessionRepository (session token lookup)
//! - [`sqlite_pool`] – SqlitePoolManager

mod account_repo;
mod conversation_repo;
mod database;
mod error;
mod models;
mod schema;
mod session_repo;
mod sqlite_pool;


pub use account_repo::AccountRepository;
pub use conversation_repo::ConversationRepository;
pub use database::Database;
pub use error::StorageError;
pub use models::{
    MembershipRecord, OrganizationRecord, PersistedMessage, ProductRecord, SessionRecord,
    SubscribedProduct, SubscriptionRecord, UserRecord,
};
pub use session_repo::SessionRepository;
pub use sqlite_pool::SqlitePoolManager;
