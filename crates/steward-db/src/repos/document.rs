//! Compliance document repository.
//!
//! Documents are written once per upload and never changed; a renewal is a
//! new row. No status column exists: status is derived on read.

use chrono::NaiveDate;
use steward_core::audit_detail::DocumentCreatedDetail;
use steward_core::entities::ComplianceDocument;
use steward_core::enums::{AuditAction, EntityType};
use steward_core::errors::require_non_empty;
use steward_core::ids::PREFIX_DOCUMENT;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{format_date, get_opt_string, parse_datetime, parse_optional_date};
use crate::repos::audit::{AuditRecord, append_audit};
use crate::repos::subcontractor::require_subcontractor;
use crate::service::StewardService;

pub(crate) const DOCUMENT_COLS: &str =
    "id, subcontractor_id, document_type, storage_ref, expiry_date, uploaded_at";

pub(crate) fn row_to_document(row: &libsql::Row) -> Result<ComplianceDocument, DatabaseError> {
    Ok(ComplianceDocument {
        id: row.get(0)?,
        subcontractor_id: row.get(1)?,
        document_type: row.get(2)?,
        storage_ref: row.get(3)?,
        expiry_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        uploaded_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// A subcontractor's documents, oldest upload first.
pub(crate) async fn fetch_documents(
    conn: &libsql::Connection,
    subcontractor_id: &str,
) -> Result<Vec<ComplianceDocument>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {DOCUMENT_COLS} FROM compliance_documents
                 WHERE subcontractor_id = ?1
                 ORDER BY uploaded_at, rowid"
            ),
            [subcontractor_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_document(&row)?);
    }
    Ok(results)
}

async fn insert_document(
    conn: &libsql::Connection,
    mut document: ComplianceDocument,
) -> Result<ComplianceDocument, DatabaseError> {
    require_subcontractor(conn, &document.subcontractor_id).await?;
    document.id = generate_id_on(conn, PREFIX_DOCUMENT).await?;
    let expiry = document.expiry_date.map(format_date);
    conn.execute(
        &format!("INSERT INTO compliance_documents ({DOCUMENT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        libsql::params![
            document.id.as_str(),
            document.subcontractor_id.as_str(),
            document.document_type.as_str(),
            document.storage_ref.as_str(),
            expiry.as_deref(),
            document.uploaded_at.to_rfc3339()
        ],
    )
    .await?;
    let detail = DocumentCreatedDetail {
        subcontractor_id: document.subcontractor_id.clone(),
        document_type: document.document_type.clone(),
        expiry_date: expiry,
    };
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Document,
            entity_id: &document.id,
            action: AuditAction::Created,
            actor_id: None,
            detail: Some(serde_json::to_value(&detail)?),
            at: document.uploaded_at,
        },
    )
    .await?;
    Ok(document)
}

impl StewardService {
    /// Record an uploaded compliance document.
    ///
    /// `expiry_date` may be absent; such a document always evaluates RED.
    ///
    /// # Errors
    ///
    /// `Validation` when `document_type` or `storage_ref` is blank, `NotFound`
    /// when the subcontractor does not exist.
    pub async fn create_document(
        &self,
        subcontractor_id: &str,
        document_type: &str,
        expiry_date: Option<NaiveDate>,
        storage_ref: &str,
    ) -> Result<ComplianceDocument, DatabaseError> {
        require_non_empty("document_type", document_type)?;
        require_non_empty("storage_ref", storage_ref)?;
        let document = ComplianceDocument {
            id: String::new(),
            subcontractor_id: subcontractor_id.to_string(),
            document_type: document_type.trim().to_string(),
            storage_ref: storage_ref.trim().to_string(),
            expiry_date,
            uploaded_at: self.now(),
        };
        let tx = self.db().begin_write().await?;
        let result = insert_document(&tx, document).await;
        let document = Self::finish(tx, result).await?;
        tracing::debug!(
            document_id = %document.id,
            subcontractor_id = %document.subcontractor_id,
            "created compliance document"
        );
        Ok(document)
    }

    /// # Errors
    ///
    /// `NotFound` when the document does not exist.
    pub async fn get_document(&self, id: &str) -> Result<ComplianceDocument, DatabaseError> {
        let _read = self.db().read_guard().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {DOCUMENT_COLS} FROM compliance_documents WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => row_to_document(&row),
            None => Err(DatabaseError::not_found(EntityType::Document, id)),
        }
    }

    /// # Errors
    ///
    /// `NotFound` when the subcontractor does not exist.
    pub async fn list_documents_for_subcontractor(
        &self,
        subcontractor_id: &str,
    ) -> Result<Vec<ComplianceDocument>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        require_subcontractor(conn, subcontractor_id).await?;
        fetch_documents(conn, subcontractor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_service, test_today};
    use pretty_assertions::assert_eq;
    use steward_core::errors::ErrorKind;

    #[tokio::test]
    async fn create_and_list_documents() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        let expiry = test_today() + chrono::Duration::days(90);

        let insurance = svc
            .create_document(&sub.id, "Insurance", Some(expiry), "uploads/compliance/ins.pdf")
            .await
            .unwrap();
        let legacy = svc
            .create_document(&sub.id, "Certification", None, "uploads/compliance/cert.pdf")
            .await
            .unwrap();

        assert!(insurance.id.starts_with("doc-"));
        assert_eq!(svc.get_document(&insurance.id).await.unwrap(), insurance);

        let docs = svc.list_documents_for_subcontractor(&sub.id).await.unwrap();
        assert_eq!(docs, vec![insurance, legacy]);
    }

    #[tokio::test]
    async fn unknown_subcontractor_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_document("sub-00000000", "Insurance", Some(test_today()), "x.pdf")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = svc
            .list_documents_for_subcontractor("sub-00000000")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        let no_type = svc
            .create_document(&sub.id, "", Some(test_today()), "x.pdf")
            .await
            .unwrap_err();
        assert_eq!(no_type.kind(), ErrorKind::Validation);
        let no_ref = svc
            .create_document(&sub.id, "Insurance", Some(test_today()), "  ")
            .await
            .unwrap_err();
        assert_eq!(no_ref.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn documents_cannot_be_rewritten() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        let doc = svc
            .create_document(&sub.id, "Insurance", Some(test_today()), "x.pdf")
            .await
            .unwrap();
        let result = svc
            .db()
            .conn()
            .execute(
                "UPDATE compliance_documents SET expiry_date = '2099-01-01' WHERE id = ?1",
                [doc.id.as_str()],
            )
            .await;
        assert!(result.is_err());
    }
}
