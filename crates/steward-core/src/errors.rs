//! Cross-cutting error types for Site Steward.
//!
//! `ErrorKind` is the stable taxonomy every crate maps its errors onto. The
//! API / CLI layer translates a kind into a transport code; the core never
//! does. Domain-specific errors (`DatabaseError`, `ConfigError`) live in their
//! own crates and expose a `kind()` accessor.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing required input. The caller can fix it.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// A concurrent mutation invariant would be violated.
    Conflict,
    /// The persistence layer failed.
    Storage,
}

impl ErrorKind {
    /// HTTP-equivalent status code for transport collaborators.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Storage => 500,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can be raised by any Steward crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (empty names, bad dates, unknown roles).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A concurrent writer changed the record first.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Other(_) => ErrorKind::Storage,
        }
    }
}

/// Reject empty or whitespace-only required text fields.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_http_codes() {
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Conflict.http_status(), 409);
        assert_eq!(ErrorKind::Storage.http_status(), 500);
    }

    #[test]
    fn require_non_empty_rejects_whitespace() {
        let err = require_non_empty("name", "   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("name is required"));
        assert!(require_non_empty("name", "Excavator").is_ok());
    }
}
