//! Response types returned to the API / CLI layer.
//!
//! Plain nested records ready for serialization. Every status field is
//! computed at query time from stored dates and the injected clock.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::compliance::{ExpiryAssessment, ProjectSummary};
use crate::entities::{Asset, ComplianceDocument, Project, Subcontractor};
use crate::enums::{ComplianceStatus, ExpiryState};

/// One document inside a compliance view.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentCompliance {
    pub id: String,
    #[serde(rename = "type")]
    pub document_type: String,
    pub expiry_date: Option<NaiveDate>,
    pub status: ComplianceStatus,
    pub days_until_expiry: Option<i64>,
}

/// A subcontractor with its aggregated status and per-document breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubcontractorCompliance {
    pub id: String,
    pub name: String,
    pub status: ComplianceStatus,
    pub documents: Vec<DocumentCompliance>,
}

/// Response of `project_compliance`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectCompliance {
    pub project_id: String,
    pub project_name: String,
    /// The date statuses were evaluated against.
    pub evaluated_on: NaiveDate,
    pub summary: ProjectSummary,
    pub subcontractors: Vec<SubcontractorCompliance>,
}

/// A move record with the destination project's display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetMoveView {
    pub id: String,
    pub project_id: String,
    pub project_name: Option<String>,
    pub moved_by: Option<String>,
    pub moved_at: DateTime<Utc>,
}

/// Asset row for list views.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
}

/// Response of `get_asset_detail`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssetDetail {
    pub asset: Asset,
    pub project_name: Option<String>,
    /// Most recent first.
    pub history: Vec<AssetMoveView>,
}

/// Project row for list views.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectListing {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub asset_count: u32,
    pub subcontractor_count: u32,
}

/// A document with its owning subcontractor and that subcontractor's projects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentContext {
    pub document: ComplianceDocument,
    pub subcontractor: Subcontractor,
    pub projects: Vec<Project>,
}

/// One RED document in an expiry report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExpiryNotice {
    pub document_id: String,
    pub document_type: String,
    pub subcontractor_id: String,
    pub subcontractor_name: String,
    pub expiry_date: Option<NaiveDate>,
    pub state: ExpiryState,
    pub days_until_expiry: Option<i64>,
    pub project_names: Vec<String>,
}

impl ExpiryNotice {
    /// Build a notice from a document context and its assessment.
    #[must_use]
    pub fn from_context(context: &DocumentContext, assessment: ExpiryAssessment) -> Self {
        Self {
            document_id: context.document.id.clone(),
            document_type: context.document.document_type.clone(),
            subcontractor_id: context.subcontractor.id.clone(),
            subcontractor_name: context.subcontractor.name.clone(),
            expiry_date: context.document.expiry_date,
            state: assessment.state,
            days_until_expiry: assessment.days_until_expiry,
            project_names: context.projects.iter().map(|p| p.name.clone()).collect(),
        }
    }
}

/// Payload produced by the expiry scan. Delivery is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExpiryReport {
    pub evaluated_on: NaiveDate,
    pub threshold_days: u64,
    pub total_documents: u32,
    pub notices: Vec<ExpiryNotice>,
}

impl ExpiryReport {
    #[must_use]
    pub fn requires_attention(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Result of replaying an asset's chain of custody.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CustodyCheck {
    pub asset_id: String,
    pub stored_location: Option<String>,
    pub replayed_location: Option<String>,
    pub consistent: bool,
    pub moves: u32,
}

/// Result of exporting an asset's chain of custody to JSONL.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CustodyExport {
    pub asset_id: String,
    pub path: String,
    pub records: u32,
}
