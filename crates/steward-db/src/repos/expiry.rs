//! Expiry scan: a read-only sweep over every compliance document.
//!
//! The scan shares the document status rule with the compliance queries and
//! produces a payload only. Delivering it is the caller's job.

use std::collections::HashMap;

use steward_core::compliance::{EXPIRY_WARNING_DAYS, assess_expiry};
use steward_core::entities::{Project, Subcontractor};
use steward_core::responses::{DocumentContext, ExpiryNotice, ExpiryReport};

use crate::error::DatabaseError;
use crate::repos::document::{DOCUMENT_COLS, row_to_document};
use crate::repos::subcontractor::{
    SUBCONTRACTOR_COLS, fetch_subcontractor_projects, row_to_subcontractor,
};
use crate::service::StewardService;

impl StewardService {
    /// Every document with its subcontractor and that subcontractor's
    /// projects. Documents without a date come first, then by expiry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn documents_with_context(&self) -> Result<Vec<DocumentContext>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();

        let mut subcontractors: HashMap<String, (Subcontractor, Vec<Project>)> = HashMap::new();
        let mut rows = conn
            .query(
                &format!("SELECT {SUBCONTRACTOR_COLS} FROM subcontractors"),
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let subcontractor = row_to_subcontractor(&row)?;
            let projects = fetch_subcontractor_projects(conn, &subcontractor.id).await?;
            subcontractors.insert(subcontractor.id.clone(), (subcontractor, projects));
        }

        let mut rows = conn
            .query(
                &format!(
                    "SELECT {DOCUMENT_COLS} FROM compliance_documents ORDER BY id"
                ),
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            let document = row_to_document(&row)?;
            let (subcontractor, projects) = subcontractors
                .get(&document.subcontractor_id)
                .cloned()
                .ok_or_else(|| {
                    DatabaseError::InvalidState(format!(
                        "document {} references unknown subcontractor {}",
                        document.id, document.subcontractor_id
                    ))
                })?;
            results.push(DocumentContext {
                document,
                subcontractor,
                projects,
            });
        }
        // Stored dates are text, so years past 9999 only sort correctly once parsed.
        results.sort_by_key(|c| (c.document.expiry_date.is_some(), c.document.expiry_date));
        Ok(results)
    }

    /// Evaluate every document against the clock and report the RED ones.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn expiry_scan(&self) -> Result<ExpiryReport, DatabaseError> {
        let today = self.today();
        let contexts = self.documents_with_context().await?;
        let total_documents = u32::try_from(contexts.len()).unwrap_or(u32::MAX);

        let notices: Vec<ExpiryNotice> = contexts
            .iter()
            .filter_map(|context| {
                let assessment = assess_expiry(context.document.expiry_date, today);
                (!assessment.status.is_green())
                    .then(|| ExpiryNotice::from_context(context, assessment))
            })
            .collect();

        tracing::info!(
            evaluated_on = %today,
            total_documents,
            flagged = notices.len(),
            "expiry scan complete"
        );
        Ok(ExpiryReport {
            evaluated_on: today,
            threshold_days: EXPIRY_WARNING_DAYS,
            total_documents,
            notices,
        })
    }
}
