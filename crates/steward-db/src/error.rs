//! Database error types for steward-db.

use steward_core::enums::EntityType;
use steward_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Caller input was rejected before touching storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    /// A concurrent writer or a uniqueness rule got there first.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// File I/O during custody export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Shorthand for a not-found error.
    pub fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Io(_)
            | Self::Other(_) => ErrorKind::Storage,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::NotFound { entity_type, id } => {
                Self::InvalidState(format!("{entity_type} not found: {id}"))
            }
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::Other(error.into())
    }
}
