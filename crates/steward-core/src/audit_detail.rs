//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! fix the shape of the common ones.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::Moved`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MovedDetail {
    pub move_id: String,
    pub from_project_id: Option<String>,
    pub to_project_id: String,
}

/// Detail for `AuditAction::Assigned`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssignedDetail {
    pub project_id: String,
    pub subcontractor_id: String,
}

/// Detail for `AuditAction::Created` on documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentCreatedDetail {
    pub subcontractor_id: String,
    pub document_type: String,
    pub expiry_date: Option<String>,
}
