//! Compliance query service.
//!
//! Read-only. Composes the document status rule and weakest-link aggregation
//! from steward-core against stored documents, evaluating every status at
//! query time against the service clock.

use chrono::NaiveDate;
use steward_core::compliance::{aggregate_statuses, assess_expiry, project_summary};
use steward_core::entities::{ComplianceDocument, Subcontractor};
use steward_core::responses::{DocumentCompliance, ProjectCompliance, SubcontractorCompliance};

use crate::error::DatabaseError;
use crate::repos::document::fetch_documents;
use crate::repos::project::{fetch_project_subcontractors, require_project};
use crate::repos::subcontractor::require_subcontractor;
use crate::service::StewardService;

fn evaluate_document(document: ComplianceDocument, today: NaiveDate) -> DocumentCompliance {
    let assessment = assess_expiry(document.expiry_date, today);
    DocumentCompliance {
        id: document.id,
        document_type: document.document_type,
        expiry_date: document.expiry_date,
        status: assessment.status,
        days_until_expiry: assessment.days_until_expiry,
    }
}

async fn evaluate_subcontractor(
    conn: &libsql::Connection,
    subcontractor: Subcontractor,
    today: NaiveDate,
) -> Result<SubcontractorCompliance, DatabaseError> {
    let documents: Vec<DocumentCompliance> = fetch_documents(conn, &subcontractor.id)
        .await?
        .into_iter()
        .map(|doc| evaluate_document(doc, today))
        .collect();
    let status = aggregate_statuses(documents.iter().map(|d| d.status));
    Ok(SubcontractorCompliance {
        id: subcontractor.id,
        name: subcontractor.name,
        status,
        documents,
    })
}

impl StewardService {
    /// Compliance state of every subcontractor assigned to a project, with
    /// the project-level tally.
    ///
    /// # Errors
    ///
    /// `NotFound` when the project does not exist.
    pub async fn project_compliance(
        &self,
        project_id: &str,
    ) -> Result<ProjectCompliance, DatabaseError> {
        let today = self.today();
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        let project = require_project(conn, project_id).await?;

        let mut subcontractors = Vec::new();
        for subcontractor in fetch_project_subcontractors(conn, project_id).await? {
            subcontractors.push(evaluate_subcontractor(conn, subcontractor, today).await?);
        }
        let summary = project_summary(subcontractors.iter().map(|s| s.status));

        Ok(ProjectCompliance {
            project_id: project.id,
            project_name: project.name,
            evaluated_on: today,
            summary,
            subcontractors,
        })
    }

    /// Compliance state of a single subcontractor across all its documents.
    ///
    /// # Errors
    ///
    /// `NotFound` when the subcontractor does not exist.
    pub async fn subcontractor_compliance(
        &self,
        subcontractor_id: &str,
    ) -> Result<SubcontractorCompliance, DatabaseError> {
        let today = self.today();
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        let subcontractor = require_subcontractor(conn, subcontractor_id).await?;
        evaluate_subcontractor(conn, subcontractor, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_service, test_service_with_clock, test_today};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use steward_core::enums::ComplianceStatus;
    use steward_core::errors::ErrorKind;

    fn days(n: i64) -> Option<NaiveDate> {
        Some(test_today() + Duration::days(n))
    }

    #[tokio::test]
    async fn empty_project_has_empty_collections() {
        let svc = test_service().await;
        let project = svc.create_project("Empty", None).await.unwrap();
        let view = svc.project_compliance(&project.id).await.unwrap();
        assert_eq!(view.project_name, "Empty");
        assert!(view.subcontractors.is_empty());
        assert_eq!(view.summary.total(), 0);
        assert!(view.summary.compliance_rate.abs() < f64::EPSILON);
        assert_eq!(view.evaluated_on, test_today());
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let svc = test_service().await;
        let err = svc.project_compliance("prj-00000000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn subcontractor_without_documents_is_red() {
        let svc = test_service().await;
        let project = svc.create_project("Alpha", None).await.unwrap();
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        svc.assign_subcontractor_to_project(&project.id, &sub.id).await.unwrap();

        let view = svc.project_compliance(&project.id).await.unwrap();
        assert_eq!(view.subcontractors[0].status, ComplianceStatus::Red);
        assert!(view.subcontractors[0].documents.is_empty());
        assert_eq!(view.summary.red_count, 1);
    }

    #[tokio::test]
    async fn per_document_statuses_are_reported() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        svc.create_document(&sub.id, "Insurance", days(90), "a.pdf").await.unwrap();
        svc.create_document(&sub.id, "Certification", None, "b.pdf").await.unwrap();

        let view = svc.subcontractor_compliance(&sub.id).await.unwrap();
        assert_eq!(view.status, ComplianceStatus::Red);
        let statuses: Vec<_> = view.documents.iter().map(|d| d.status).collect();
        assert_eq!(statuses, vec![ComplianceStatus::Green, ComplianceStatus::Red]);
        assert_eq!(view.documents[0].days_until_expiry, Some(90));
        assert_eq!(view.documents[1].days_until_expiry, None);
    }

    #[tokio::test]
    async fn status_follows_the_clock() {
        let (svc, clock) = test_service_with_clock().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        svc.create_document(&sub.id, "Insurance", days(31), "a.pdf").await.unwrap();

        let before = svc.subcontractor_compliance(&sub.id).await.unwrap();
        assert_eq!(before.status, ComplianceStatus::Green);

        clock.advance(Duration::days(1));
        let after = svc.subcontractor_compliance(&sub.id).await.unwrap();
        assert_eq!(after.status, ComplianceStatus::Red);
        assert_eq!(after.documents[0].days_until_expiry, Some(30));
    }

    #[tokio::test]
    async fn superseded_documents_still_count() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        svc.create_document(&sub.id, "Insurance", days(5), "old.pdf").await.unwrap();
        svc.create_document(&sub.id, "Insurance", days(365), "new.pdf").await.unwrap();

        let view = svc.subcontractor_compliance(&sub.id).await.unwrap();
        assert_eq!(view.status, ComplianceStatus::Red);
        assert_eq!(view.documents.len(), 2);
    }

    #[tokio::test]
    async fn query_is_idempotent() {
        let svc = test_service().await;
        let project = svc.create_project("Alpha", None).await.unwrap();
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        svc.assign_subcontractor_to_project(&project.id, &sub.id).await.unwrap();
        svc.create_document(&sub.id, "Insurance", days(45), "a.pdf").await.unwrap();

        let first = svc.project_compliance(&project.id).await.unwrap();
        let second = svc.project_compliance(&project.id).await.unwrap();
        assert_eq!(first, second);
    }
}
