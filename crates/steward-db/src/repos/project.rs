//! Project repository: create, list, subcontractor assignment, and the
//! derived asset set.

use chrono::{DateTime, Utc};
use steward_core::audit_detail::AssignedDetail;
use steward_core::entities::{Asset, Project, Subcontractor};
use steward_core::enums::{AuditAction, EntityType};
use steward_core::errors::require_non_empty;
use steward_core::ids::PREFIX_PROJECT;
use steward_core::responses::ProjectListing;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{get_count, get_opt_string, normalize_optional, parse_datetime};
use crate::repos::asset::{ASSET_COLS, row_to_asset};
use crate::repos::audit::{AuditRecord, append_audit};
use crate::repos::subcontractor::{require_subcontractor, row_to_subcontractor};
use crate::service::StewardService;

pub(crate) const PROJECT_COLS: &str = "id, name, location, created_at";

pub(crate) fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        location: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

pub(crate) async fn fetch_project(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<Project>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {PROJECT_COLS} FROM projects WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_project(&row)?)),
        None => Ok(None),
    }
}

pub(crate) async fn require_project(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Project, DatabaseError> {
    fetch_project(conn, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Project, id))
}

/// Subcontractors assigned to a project, by name.
pub(crate) async fn fetch_project_subcontractors(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Vec<Subcontractor>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT s.id, s.name, s.email, s.phone, s.created_at
             FROM subcontractors s
             JOIN project_subcontractors ps ON ps.subcontractor_id = s.id
             WHERE ps.project_id = ?1
             ORDER BY s.name, s.id",
            [project_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_subcontractor(&row)?);
    }
    Ok(results)
}

/// Insert `project` under a fresh ID and audit it.
async fn insert_project(
    conn: &libsql::Connection,
    mut project: Project,
) -> Result<Project, DatabaseError> {
    project.id = generate_id_on(conn, PREFIX_PROJECT).await?;
    conn.execute(
        &format!("INSERT INTO projects ({PROJECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
        libsql::params![
            project.id.as_str(),
            project.name.as_str(),
            project.location.as_deref(),
            project.created_at.to_rfc3339()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Project,
            entity_id: &project.id,
            action: AuditAction::Created,
            actor_id: None,
            detail: None,
            at: project.created_at,
        },
    )
    .await?;
    Ok(project)
}

async fn insert_assignment(
    conn: &libsql::Connection,
    project_id: &str,
    subcontractor_id: &str,
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    require_project(conn, project_id).await?;
    require_subcontractor(conn, subcontractor_id).await?;

    let mut existing = conn
        .query(
            "SELECT 1 FROM project_subcontractors
             WHERE project_id = ?1 AND subcontractor_id = ?2",
            libsql::params![project_id, subcontractor_id],
        )
        .await?;
    if existing.next().await?.is_some() {
        return Err(DatabaseError::Conflict(format!(
            "subcontractor {subcontractor_id} is already assigned to project {project_id}"
        )));
    }

    conn.execute(
        "INSERT INTO project_subcontractors (project_id, subcontractor_id, assigned_at)
         VALUES (?1, ?2, ?3)",
        libsql::params![project_id, subcontractor_id, now.to_rfc3339()],
    )
    .await?;
    let detail = AssignedDetail {
        project_id: project_id.to_string(),
        subcontractor_id: subcontractor_id.to_string(),
    };
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Project,
            entity_id: project_id,
            action: AuditAction::Assigned,
            actor_id: None,
            detail: Some(serde_json::to_value(&detail)?),
            at: now,
        },
    )
    .await?;
    Ok(())
}

impl StewardService {
    /// Create a project.
    ///
    /// # Errors
    ///
    /// `Validation` when `name` is blank.
    pub async fn create_project(
        &self,
        name: &str,
        location: Option<&str>,
    ) -> Result<Project, DatabaseError> {
        require_non_empty("name", name)?;
        let project = Project {
            id: String::new(),
            name: name.trim().to_string(),
            location: normalize_optional(location),
            created_at: self.now(),
        };
        let tx = self.db().begin_write().await?;
        let result = insert_project(&tx, project).await;
        let project = Self::finish(tx, result).await?;
        tracing::debug!(project_id = %project.id, "created project");
        Ok(project)
    }

    /// # Errors
    ///
    /// `NotFound` when the project does not exist.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let _read = self.db().read_guard().await;
        require_project(self.db().conn(), id).await
    }

    /// Projects with their derived asset and subcontractor counts, by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(&self, limit: u32) -> Result<Vec<ProjectListing>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.id, p.name, p.location,
                        (SELECT COUNT(*) FROM assets a WHERE a.project_id = p.id),
                        (SELECT COUNT(*) FROM project_subcontractors ps WHERE ps.project_id = p.id)
                 FROM projects p
                 ORDER BY p.name, p.id
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(ProjectListing {
                id: row.get(0)?,
                name: row.get(1)?,
                location: get_opt_string(&row, 2)?,
                asset_count: get_count(&row, 3)?,
                subcontractor_count: get_count(&row, 4)?,
            });
        }
        Ok(results)
    }

    /// Associate a subcontractor with a project.
    ///
    /// # Errors
    ///
    /// `NotFound` when either side is missing, `Conflict` when the pair is
    /// already associated.
    pub async fn assign_subcontractor_to_project(
        &self,
        project_id: &str,
        subcontractor_id: &str,
    ) -> Result<(), DatabaseError> {
        let now = self.now();
        let tx = self.db().begin_write().await?;
        let result = insert_assignment(&tx, project_id, subcontractor_id, now).await;
        Self::finish(tx, result).await?;
        tracing::debug!(project_id, subcontractor_id, "assigned subcontractor");
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` when the project does not exist.
    pub async fn subcontractors_for_project(
        &self,
        project_id: &str,
    ) -> Result<Vec<Subcontractor>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        require_project(conn, project_id).await?;
        fetch_project_subcontractors(conn, project_id).await
    }

    /// Assets whose current location is `project_id`, by name.
    ///
    /// # Errors
    ///
    /// `NotFound` when the project does not exist.
    pub async fn assets_at_project(&self, project_id: &str) -> Result<Vec<Asset>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        require_project(conn, project_id).await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {ASSET_COLS} FROM assets WHERE project_id = ?1 ORDER BY name, id"
                ),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_asset(&row)?);
        }
        Ok(results)
    }
}
