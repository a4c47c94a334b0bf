//! Status enums, roles, entity types, and audit actions for Site Steward.
//!
//! Storage enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ComplianceStatus` serializes as `"RED"` / `"GREEN"`, the wire spelling the
//! API layer has always exposed. It is never persisted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ComplianceStatus
// ---------------------------------------------------------------------------

/// Two-valued compliance signal. `Red` covers both non-compliant and unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComplianceStatus {
    Red,
    Green,
}

impl ComplianceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
        }
    }

    #[must_use]
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Green)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExpiryState
// ---------------------------------------------------------------------------

/// Finer-grained reading of a document's expiry used by the expiry scan.
///
/// ```text
/// missing        → RED (no date on file)
/// expired        → RED (days < 0)
/// expiring_soon  → RED (0 ≤ days ≤ 30)
/// valid          → GREEN
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    Missing,
    Expired,
    ExpiringSoon,
    Valid,
}

impl ExpiryState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring_soon",
            Self::Valid => "valid",
        }
    }
}

impl fmt::Display for ExpiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Closed set of operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Foreman,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Foreman => "foreman",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Moved,
    Assigned,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Moved => "moved",
            Self::Assigned => "assigned",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail and not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Asset,
    AssetMove,
    Project,
    Subcontractor,
    Document,
    User,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::AssetMove => "asset_move",
            Self::Project => "project",
            Self::Subcontractor => "subcontractor",
            Self::Document => "document",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
