//! Compliance status derivation.
//!
//! Pure, total functions. Nothing here reads the system clock or touches
//! storage; callers pass `today` from a [`crate::clock::Clock`]. Status is
//! always recomputed from the stored expiry date and is never persisted.
//!
//! Both rules fail closed: a missing expiry date is RED, and a subcontractor
//! with no documents is RED.

use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ComplianceDocument;
use crate::enums::{ComplianceStatus, ExpiryState};

/// Documents expiring within this many days (inclusive) are RED.
pub const EXPIRY_WARNING_DAYS: u64 = 30;

/// Last expiry date that still counts as RED for `today`.
///
/// `None` when `today + 30` is past the representable range, in which case
/// every date is within the window.
fn red_threshold(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(EXPIRY_WARNING_DAYS))
}

/// Status of a single document.
///
/// RED when `expiry_date` is absent or `expiry_date <= today + 30 days`.
#[must_use]
pub fn document_status(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ComplianceStatus {
    let Some(expiry) = expiry_date else {
        return ComplianceStatus::Red;
    };
    match red_threshold(today) {
        Some(threshold) if expiry > threshold => ComplianceStatus::Green,
        _ => ComplianceStatus::Red,
    }
}

/// Weakest-link aggregation over already-evaluated statuses.
///
/// Empty input is RED.
#[must_use]
pub fn aggregate_statuses<I>(statuses: I) -> ComplianceStatus
where
    I: IntoIterator<Item = ComplianceStatus>,
{
    let mut any = false;
    for status in statuses {
        if status == ComplianceStatus::Red {
            return ComplianceStatus::Red;
        }
        any = true;
    }
    if any {
        ComplianceStatus::Green
    } else {
        ComplianceStatus::Red
    }
}

/// Status of a subcontractor from its documents.
#[must_use]
pub fn subcontractor_status(documents: &[ComplianceDocument], today: NaiveDate) -> ComplianceStatus {
    aggregate_statuses(
        documents
            .iter()
            .map(|doc| document_status(doc.expiry_date, today)),
    )
}

/// Project-level tally of subcontractor statuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectSummary {
    pub green_count: u32,
    pub red_count: u32,
    /// `green_count / (green_count + red_count)`, or `0.0` with no subcontractors.
    pub compliance_rate: f64,
}

impl ProjectSummary {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.green_count + self.red_count
    }
}

/// Tally subcontractor statuses into a project summary.
#[must_use]
pub fn project_summary<I>(statuses: I) -> ProjectSummary
where
    I: IntoIterator<Item = ComplianceStatus>,
{
    let (mut green_count, mut red_count) = (0u32, 0u32);
    for status in statuses {
        match status {
            ComplianceStatus::Green => green_count = green_count.saturating_add(1),
            ComplianceStatus::Red => red_count = red_count.saturating_add(1),
        }
    }
    let total = green_count.saturating_add(red_count);
    let compliance_rate = if total == 0 {
        0.0
    } else {
        f64::from(green_count) / f64::from(total)
    };
    ProjectSummary {
        green_count,
        red_count,
        compliance_rate,
    }
}

/// Expiry reading used by the expiry scan and per-document views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExpiryAssessment {
    pub status: ComplianceStatus,
    pub state: ExpiryState,
    /// Negative when already expired. `None` when no date is on file.
    pub days_until_expiry: Option<i64>,
}

/// Classify a document's expiry. `status` always agrees with [`document_status`].
#[must_use]
pub fn assess_expiry(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryAssessment {
    let status = document_status(expiry_date, today);
    let Some(expiry) = expiry_date else {
        return ExpiryAssessment {
            status,
            state: ExpiryState::Missing,
            days_until_expiry: None,
        };
    };

    let days = expiry.signed_duration_since(today).num_days();
    let state = if days < 0 {
        ExpiryState::Expired
    } else if status == ComplianceStatus::Red {
        ExpiryState::ExpiringSoon
    } else {
        ExpiryState::Valid
    };

    ExpiryAssessment {
        status,
        state,
        days_until_expiry: Some(days),
    }
}
