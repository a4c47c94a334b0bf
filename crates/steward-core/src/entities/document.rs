use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A compliance document uploaded for a subcontractor.
///
/// Never mutated after creation; a renewal is a new document. The compliance
/// status is derived from `expiry_date` at read time and is not a field here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComplianceDocument {
    pub id: String,
    pub subcontractor_id: String,
    /// Free-text category, e.g. `Insurance`, `Certification`.
    pub document_type: String,
    /// Opaque reference to the stored file. Not interpreted by the core.
    pub storage_ref: String,
    /// `None` only for legacy rows; evaluated as the worst case.
    pub expiry_date: Option<NaiveDate>,
    pub uploaded_at: DateTime<Utc>,
}
