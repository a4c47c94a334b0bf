use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// An operator account. Only referenced by the core as a move actor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    /// Opaque handle to the credential held by the auth collaborator.
    #[serde(default, skip_serializing)]
    pub credential_ref: String,
    pub created_at: DateTime<Utc>,
}
