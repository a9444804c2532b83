//! Entry point of the storage crate: one pool, initialized schema, repository handles.

use tracing::{error, info};

use crate::account_repo::AccountRepository;
use crate::conversation_repo::ConversationRepository;
use crate::error::StorageError;
use crate::schema;
use crate::session_repo::SessionRepository;
use crate::sqlite_pool::SqlitePoolManager;

/// Connected database with its schema in place. Cheap to clone; repositories share the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool_manager: SqlitePoolManager,
}

impl Database {
    /// Opens (or creates) the database and runs schema initialization.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await.map_err(|e| {
            error!(error = %e, database_url = %database_url, "Failed to open database");
            e
        })?;
        schema::init(pool_manager.pool()).await?;
        info!(database_url = %database_url, "Database connected");
        Ok(Self { pool_manager })
    }

    pub fn conversations(&self) -> ConversationRepository {
        ConversationRepository::new(self.pool_manager.clone())
    }

    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.pool_manager.clone())
    }

    pub fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.pool_manager.clone())
    }

    /// Lists the tables present in the database (used by the `migrate` command).
    pub async fn table_names(&self) -> Result<Vec<String>, StorageError> {
        Ok(schema::table_names(self.pool_manager.pool()).await?)
    }
}
