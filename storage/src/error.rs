//! Errors from the SQLite repositories.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Connection, query or constraint failure reported by sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A row that was just written could not be read back.
    #[error("Not found: {0}")]
    NotFound(String),
}
