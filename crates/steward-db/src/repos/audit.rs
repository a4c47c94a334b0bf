//! Audit trail repository.
//!
//! Append-only audit entries recording every mutation, written inside the
//! mutation's own transaction. Supports dynamic filtering.

use chrono::{DateTime, Utc};
use steward_core::entities::AuditEntry;
use steward_core::enums::{AuditAction, EntityType};
use steward_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::StewardService;

const SELECT_COLS: &str = "id, entity_type, entity_id, action, actor_id, detail, created_at";

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

/// Fields of an audit entry supplied by the mutation.
pub(crate) struct AuditRecord<'a> {
    pub entity_type: EntityType,
    pub entity_id: &'a str,
    pub action: AuditAction,
    pub actor_id: Option<&'a str>,
    pub detail: Option<serde_json::Value>,
    pub at: DateTime<Utc>,
}

fn row_to_entry(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<String>(0)?,
        entity_type: parse_enum(&row.get::<String>(1)?)?,
        entity_id: row.get::<String>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        actor_id: get_opt_string(row, 4)?,
        detail: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Append an audit entry on `conn`. Called by every mutation inside its
/// transaction.
pub(crate) async fn append_audit(
    conn: &libsql::Connection,
    record: AuditRecord<'_>,
) -> Result<AuditEntry, DatabaseError> {
    let id = generate_id_on(conn, PREFIX_AUDIT).await?;
    let detail = record.detail;
    conn.execute(
        &format!("INSERT INTO audit_trail ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            id.as_str(),
            record.entity_type.as_str(),
            record.entity_id,
            record.action.as_str(),
            record.actor_id,
            detail.as_ref().map(std::string::ToString::to_string),
            record.at.to_rfc3339()
        ],
    )
    .await?;

    Ok(AuditEntry {
        id,
        entity_type: record.entity_type,
        entity_id: record.entity_id.to_string(),
        action: record.action,
        actor_id: record.actor_id.map(String::from),
        detail,
        created_at: record.at,
    })
}

impl StewardService {
    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(libsql::Value::Text(eid.clone()));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let _read = self.db().read_guard().await;
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn creations_are_audited() {
        let svc = test_service().await;
        let project = svc.create_project("Harbour Tower", Some("Pier 4")).await.unwrap();
        let asset = svc.create_asset("Scissor lift", "Plant").await.unwrap();

        let all = svc.query_audit(&AuditFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|e| e.action == AuditAction::Created));

        let only_assets = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Asset),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(only_assets.len(), 1);
        assert_eq!(only_assets[0].entity_id, asset.id);

        let by_id = svc
            .query_audit(&AuditFilter {
                entity_id: Some(project.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_id[0].entity_type, EntityType::Project);
    }

    #[tokio::test]
    async fn move_audit_carries_detail_and_actor() {
        let svc = test_service().await;
        let p1 = svc.create_project("P1", None).await.unwrap();
        let p2 = svc.create_project("P2", None).await.unwrap();
        let asset = svc.create_asset("Generator", "Plant").await.unwrap();
        svc.move_asset(&asset.id, &p1.id, Some("usr-00000001")).await.unwrap();
        let second = svc.move_asset(&asset.id, &p2.id, Some("usr-00000001")).await.unwrap();

        let moves = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Moved),
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(moves.len(), 1);
        let entry = &moves[0];
        assert_eq!(entry.actor_id.as_deref(), Some("usr-00000001"));
        let detail = entry.detail.as_ref().unwrap();
        assert_eq!(detail["move_id"], second.id.as_str());
        assert_eq!(detail["from_project_id"], p1.id.as_str());
        assert_eq!(detail["to_project_id"], p2.id.as_str());
    }

    #[tokio::test]
    async fn failed_mutation_leaves_no_audit() {
        let svc = test_service().await;
        let asset = svc.create_asset("Generator", "Plant").await.unwrap();
        let _ = svc.move_asset(&asset.id, "prj-missing", None).await;

        let moved = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::Moved),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(moved.is_empty());
    }
}
