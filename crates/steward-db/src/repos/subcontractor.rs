//! Subcontractor repository.

use steward_core::entities::{Project, Subcontractor};
use steward_core::enums::{AuditAction, EntityType};
use steward_core::errors::require_non_empty;
use steward_core::ids::PREFIX_SUBCONTRACTOR;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{get_opt_string, normalize_optional, parse_datetime};
use crate::repos::audit::{AuditRecord, append_audit};
use crate::repos::project::row_to_project;
use crate::service::StewardService;

pub(crate) const SUBCONTRACTOR_COLS: &str = "id, name, email, phone, created_at";

pub(crate) fn row_to_subcontractor(row: &libsql::Row) -> Result<Subcontractor, DatabaseError> {
    Ok(Subcontractor {
        id: row.get(0)?,
        name: row.get(1)?,
        email: get_opt_string(row, 2)?,
        phone: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

pub(crate) async fn require_subcontractor(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Subcontractor, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SUBCONTRACTOR_COLS} FROM subcontractors WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => row_to_subcontractor(&row),
        None => Err(DatabaseError::not_found(EntityType::Subcontractor, id)),
    }
}

/// Projects a subcontractor is assigned to, by name.
pub(crate) async fn fetch_subcontractor_projects(
    conn: &libsql::Connection,
    subcontractor_id: &str,
) -> Result<Vec<Project>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT p.id, p.name, p.location, p.created_at
             FROM projects p
             JOIN project_subcontractors ps ON ps.project_id = p.id
             WHERE ps.subcontractor_id = ?1
             ORDER BY p.name, p.id",
            [subcontractor_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_project(&row)?);
    }
    Ok(results)
}

async fn insert_subcontractor(
    conn: &libsql::Connection,
    mut subcontractor: Subcontractor,
) -> Result<Subcontractor, DatabaseError> {
    subcontractor.id = generate_id_on(conn, PREFIX_SUBCONTRACTOR).await?;
    conn.execute(
        &format!("INSERT INTO subcontractors ({SUBCONTRACTOR_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
        libsql::params![
            subcontractor.id.as_str(),
            subcontractor.name.as_str(),
            subcontractor.email.as_deref(),
            subcontractor.phone.as_deref(),
            subcontractor.created_at.to_rfc3339()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Subcontractor,
            entity_id: &subcontractor.id,
            action: AuditAction::Created,
            actor_id: None,
            detail: None,
            at: subcontractor.created_at,
        },
    )
    .await?;
    Ok(subcontractor)
}

impl StewardService {
    /// Register a subcontractor with optional contact details.
    ///
    /// # Errors
    ///
    /// `Validation` when `name` is blank.
    pub async fn create_subcontractor(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Subcontractor, DatabaseError> {
        require_non_empty("name", name)?;
        let subcontractor = Subcontractor {
            id: String::new(),
            name: name.trim().to_string(),
            email: normalize_optional(email),
            phone: normalize_optional(phone),
            created_at: self.now(),
        };
        let tx = self.db().begin_write().await?;
        let result = insert_subcontractor(&tx, subcontractor).await;
        let subcontractor = Self::finish(tx, result).await?;
        tracing::debug!(subcontractor_id = %subcontractor.id, "created subcontractor");
        Ok(subcontractor)
    }

    /// # Errors
    ///
    /// `NotFound` when the subcontractor does not exist.
    pub async fn get_subcontractor(&self, id: &str) -> Result<Subcontractor, DatabaseError> {
        let _read = self.db().read_guard().await;
        require_subcontractor(self.db().conn(), id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_subcontractors(
        &self,
        limit: u32,
    ) -> Result<Vec<Subcontractor>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SUBCONTRACTOR_COLS} FROM subcontractors ORDER BY name, id LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_subcontractor(&row)?);
        }
        Ok(results)
    }

    /// # Errors
    ///
    /// `NotFound` when the subcontractor does not exist.
    pub async fn projects_for_subcontractor(
        &self,
        subcontractor_id: &str,
    ) -> Result<Vec<Project>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        require_subcontractor(conn, subcontractor_id).await?;
        fetch_subcontractor_projects(conn, subcontractor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;
    use steward_core::errors::ErrorKind;

    #[tokio::test]
    async fn create_keeps_contact_fields() {
        let svc = test_service().await;
        let sub = svc
            .create_subcontractor("Acme Scaffolding", Some("ops@acme.test"), Some(""))
            .await
            .unwrap();
        assert!(sub.id.starts_with("sub-"));
        assert_eq!(sub.email.as_deref(), Some("ops@acme.test"));
        assert_eq!(sub.phone, None);
        assert_eq!(svc.get_subcontractor(&sub.id).await.unwrap(), sub);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = test_service().await;
        let err = svc.create_subcontractor(" ", None, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(svc.list_subcontractors(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let svc = test_service().await;
        svc.create_subcontractor("Northwind Electric", None, None).await.unwrap();
        svc.create_subcontractor("Acme Scaffolding", None, None).await.unwrap();
        let names: Vec<_> = svc
            .list_subcontractors(10)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Acme Scaffolding", "Northwind Electric"]);
    }

    #[tokio::test]
    async fn projects_for_subcontractor_lists_assignments() {
        let svc = test_service().await;
        let sub = svc.create_subcontractor("Acme", None, None).await.unwrap();
        let p1 = svc.create_project("Bravo", None).await.unwrap();
        let p2 = svc.create_project("Alpha", None).await.unwrap();
        svc.create_project("Charlie", None).await.unwrap();
        svc.assign_subcontractor_to_project(&p1.id, &sub.id).await.unwrap();
        svc.assign_subcontractor_to_project(&p2.id, &sub.id).await.unwrap();

        let projects = svc.projects_for_subcontractor(&sub.id).await.unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);

        let err = svc.projects_for_subcontractor("sub-00000000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
