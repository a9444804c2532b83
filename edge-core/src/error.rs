//! Error types for the chat service core.
//!
//! [`EdgeError`] mirrors the three failure classes callers have to tell apart: bad client input,
//! an unavailable upstream (session store, database, completion API) and missing data.

use std::fmt;

use thiserror::Error;

/// External collaborator that produced an [`EdgeError::Upstream`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    SessionStore,
    Database,
    Completion,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subsystem::SessionStore => "session_store",
            Subsystem::Database => "database",
            Subsystem::Completion => "completion",
        };
        f.write_str(name)
    }
}

/// Top-level error (client input, upstream collaborator, not found, config, IO).
#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{subsystem} unavailable: {message}")]
    Upstream {
        subsystem: Subsystem,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EdgeError {
    /// Wraps any displayable collaborator failure as [`EdgeError::Upstream`].
    pub fn upstream(subsystem: Subsystem, err: impl fmt::Display) -> Self {
        EdgeError::Upstream {
            subsystem,
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EdgeError::NotFound(_))
    }
}

/// Result type for core operations; uses [`EdgeError`].
pub type Result<T> = std::result::Result<T, EdgeError>;
