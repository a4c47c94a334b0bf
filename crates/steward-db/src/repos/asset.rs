//! Asset ledger: the authoritative current location of every asset and its
//! append-only chain of custody.
//!
//! `assets.project_id` and the `asset_moves` rows only ever change together,
//! in one transaction. Moves of the same asset are serialized by the
//! per-asset lock and fenced by the `assets.version` counter, so no move is
//! lost and `sequence` orders the history even when timestamps tie.

use chrono::{DateTime, Utc};
use steward_core::audit_detail::MovedDetail;
use steward_core::entities::{Asset, AssetMove};
use steward_core::enums::{AuditAction, EntityType};
use steward_core::errors::require_non_empty;
use steward_core::ids::{PREFIX_ASSET, PREFIX_MOVE};
use steward_core::responses::{AssetDetail, AssetMoveView, AssetSummary, CustodyCheck};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::repos::audit::{AuditRecord, append_audit};
use crate::repos::project::{fetch_project, require_project};
use crate::service::StewardService;

pub(crate) const ASSET_COLS: &str = "id, name, category, project_id, created_at";

const MOVE_COLS: &str = "id, asset_id, project_id, moved_by, moved_at";

pub(crate) fn row_to_asset(row: &libsql::Row) -> Result<Asset, DatabaseError> {
    Ok(Asset {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        project_id: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_move(row: &libsql::Row) -> Result<AssetMove, DatabaseError> {
    Ok(AssetMove {
        id: row.get(0)?,
        asset_id: row.get(1)?,
        project_id: row.get(2)?,
        moved_by: get_opt_string(row, 3)?,
        moved_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Which end of the chain comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HistoryOrder {
    NewestFirst,
    OldestFirst,
}

impl HistoryOrder {
    const fn sql(self) -> &'static str {
        match self {
            Self::NewestFirst => "DESC",
            Self::OldestFirst => "ASC",
        }
    }
}

pub(crate) async fn require_asset(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Asset, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {ASSET_COLS} FROM assets WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => row_to_asset(&row),
        None => Err(DatabaseError::not_found(EntityType::Asset, id)),
    }
}

pub(crate) async fn fetch_history(
    conn: &libsql::Connection,
    asset_id: &str,
    order: HistoryOrder,
) -> Result<Vec<AssetMove>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {MOVE_COLS} FROM asset_moves WHERE asset_id = ?1 ORDER BY sequence {}",
                order.sql()
            ),
            [asset_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_move(&row)?);
    }
    Ok(results)
}

/// Current location after applying `moves`, oldest first, to an asset with
/// no location.
#[must_use]
pub fn replay_location<'a, I>(moves: I) -> Option<String>
where
    I: IntoIterator<Item = &'a AssetMove>,
{
    moves
        .into_iter()
        .fold(None, |_, record| Some(record.project_id.clone()))
}

async fn insert_asset(conn: &libsql::Connection, mut asset: Asset) -> Result<Asset, DatabaseError> {
    asset.id = generate_id_on(conn, PREFIX_ASSET).await?;
    conn.execute(
        &format!("INSERT INTO assets ({ASSET_COLS}, version) VALUES (?1, ?2, ?3, NULL, ?4, 0)"),
        libsql::params![
            asset.id.as_str(),
            asset.name.as_str(),
            asset.category.as_str(),
            asset.created_at.to_rfc3339()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Asset,
            entity_id: &asset.id,
            action: AuditAction::Created,
            actor_id: None,
            detail: None,
            at: asset.created_at,
        },
    )
    .await?;
    Ok(asset)
}

/// Timestamp source for a move.
#[derive(Debug, Clone, Copy)]
enum MoveStamp {
    /// Read from the service clock once the write lock is held. Never earlier
    /// than the asset's latest move, even if the wall clock stepped back.
    Clock(DateTime<Utc>),
    /// Supplied by the caller. Rejected when it predates the latest move.
    Explicit(DateTime<Utc>),
}

/// The move itself: validate both ends, append the record, advance the
/// location pointer against the version that was read, audit.
async fn record_move(
    conn: &libsql::Connection,
    asset_id: &str,
    project_id: &str,
    actor_id: Option<&str>,
    stamp: MoveStamp,
) -> Result<(AssetMove, Option<String>), DatabaseError> {
    let mut rows = conn
        .query("SELECT project_id, version FROM assets WHERE id = ?1", [asset_id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Asset, asset_id))?;
    let from_project_id = get_opt_string(&row, 0)?;
    let version = row.get::<i64>(1)?;
    drop(rows);

    require_project(conn, project_id).await?;

    // History is ordered by sequence, so moved_at must never go backwards.
    let latest = latest_moved_at(conn, asset_id).await?;
    let at = match (stamp, latest) {
        (MoveStamp::Clock(now), Some(latest)) => now.max(latest),
        (MoveStamp::Explicit(at), Some(latest)) if at < latest => {
            return Err(DatabaseError::Validation(format!(
                "moved_at {} precedes the latest move of asset {asset_id} at {}",
                at.to_rfc3339(),
                latest.to_rfc3339()
            )));
        }
        (MoveStamp::Clock(at) | MoveStamp::Explicit(at), _) => at,
    };

    let next_version = version + 1;
    let record = AssetMove {
        id: generate_id_on(conn, PREFIX_MOVE).await?,
        asset_id: asset_id.to_string(),
        project_id: project_id.to_string(),
        moved_by: actor_id.map(String::from),
        moved_at: at,
    };
    conn.execute(
        &format!("INSERT INTO asset_moves ({MOVE_COLS}, sequence) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        libsql::params![
            record.id.as_str(),
            record.asset_id.as_str(),
            record.project_id.as_str(),
            record.moved_by.as_deref(),
            record.moved_at.to_rfc3339(),
            next_version
        ],
    )
    .await?;

    let updated = conn
        .execute(
            "UPDATE assets SET project_id = ?1, version = ?2 WHERE id = ?3 AND version = ?4",
            libsql::params![project_id, next_version, asset_id, version],
        )
        .await?;
    // Unreachable from this process while the write transaction is held; it
    // catches a writer in another process that committed between our read and
    // this update.
    if updated == 0 {
        return Err(DatabaseError::Conflict(format!(
            "asset {asset_id} was moved concurrently"
        )));
    }

    let detail = MovedDetail {
        move_id: record.id.clone(),
        from_project_id: from_project_id.clone(),
        to_project_id: project_id.to_string(),
    };
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::Asset,
            entity_id: asset_id,
            action: AuditAction::Moved,
            actor_id,
            detail: Some(serde_json::to_value(&detail)?),
            at,
        },
    )
    .await?;
    Ok((record, from_project_id))
}

async fn latest_moved_at(
    conn: &libsql::Connection,
    asset_id: &str,
) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT moved_at FROM asset_moves WHERE asset_id = ?1 ORDER BY sequence DESC LIMIT 1",
            [asset_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(parse_datetime(&row.get::<String>(0)?)?)),
        None => Ok(None),
    }
}

async fn history_views(
    conn: &libsql::Connection,
    asset_id: &str,
) -> Result<Vec<AssetMoveView>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT m.id, m.project_id, p.name, m.moved_by, m.moved_at
             FROM asset_moves m
             LEFT JOIN projects p ON p.id = m.project_id
             WHERE m.asset_id = ?1
             ORDER BY m.sequence DESC",
            [asset_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(AssetMoveView {
            id: row.get(0)?,
            project_id: row.get(1)?,
            project_name: get_opt_string(&row, 2)?,
            moved_by: get_opt_string(&row, 3)?,
            moved_at: parse_datetime(&row.get::<String>(4)?)?,
        });
    }
    Ok(results)
}

impl StewardService {
    /// Register an asset. It starts with no current location.
    ///
    /// # Errors
    ///
    /// `Validation` when `name` or `category` is blank.
    pub async fn create_asset(&self, name: &str, category: &str) -> Result<Asset, DatabaseError> {
        require_non_empty("name", name)?;
        require_non_empty("category", category)?;
        let asset = Asset {
            id: String::new(),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            project_id: None,
            created_at: self.now(),
        };
        let tx = self.db().begin_write().await?;
        let result = insert_asset(&tx, asset).await;
        let asset = Self::finish(tx, result).await?;
        tracing::debug!(asset_id = %asset.id, category = %asset.category, "created asset");
        Ok(asset)
    }

    /// Move an asset to a project, timestamped by the service clock.
    ///
    /// The clock is read after the write lock is taken, so concurrent moves
    /// are stamped in commit order.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset or destination project does not exist,
    /// `Conflict` when another writer moved the asset between read and write.
    pub async fn move_asset(
        &self,
        asset_id: &str,
        project_id: &str,
        actor_id: Option<&str>,
    ) -> Result<AssetMove, DatabaseError> {
        self.apply_move(asset_id, project_id, actor_id, None).await
    }

    /// Move an asset to a project at an explicit instant.
    ///
    /// Appends one [`AssetMove`] and updates the current location in a single
    /// transaction. On any error neither changes. `actor_id` is recorded as
    /// supplied by the authenticated caller.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset or destination project does not exist,
    /// `Validation` when `at` is earlier than the asset's latest move,
    /// `Conflict` when another writer moved the asset between read and write.
    pub async fn move_asset_at(
        &self,
        asset_id: &str,
        project_id: &str,
        actor_id: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<AssetMove, DatabaseError> {
        self.apply_move(asset_id, project_id, actor_id, Some(at)).await
    }

    async fn apply_move(
        &self,
        asset_id: &str,
        project_id: &str,
        actor_id: Option<&str>,
        at: Option<DateTime<Utc>>,
    ) -> Result<AssetMove, DatabaseError> {
        let _asset_guard = self.asset_locks().acquire(asset_id).await;
        let tx = self.db().begin_write().await?;
        let stamp = at.map_or_else(|| MoveStamp::Clock(self.now()), MoveStamp::Explicit);
        let result = record_move(&tx, asset_id, project_id, actor_id, stamp).await;
        let (record, from) = Self::finish(tx, result).await?;
        tracing::info!(
            asset_id,
            move_id = %record.id,
            from = from.as_deref().unwrap_or("-"),
            to = project_id,
            "moved asset"
        );
        Ok(record)
    }

    /// # Errors
    ///
    /// `NotFound` when the asset does not exist.
    pub async fn get_asset(&self, id: &str) -> Result<Asset, DatabaseError> {
        let _read = self.db().read_guard().await;
        require_asset(self.db().conn(), id).await
    }

    /// An asset's chain of custody, most recent first.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset does not exist.
    pub async fn asset_history(&self, asset_id: &str) -> Result<Vec<AssetMove>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        require_asset(conn, asset_id).await?;
        fetch_history(conn, asset_id, HistoryOrder::NewestFirst).await
    }

    /// Assets with their current project name, by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_assets(&self, limit: u32) -> Result<Vec<AssetSummary>, DatabaseError> {
        let _read = self.db().read_guard().await;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT a.id, a.name, a.category, a.project_id, p.name
                 FROM assets a
                 LEFT JOIN projects p ON p.id = a.project_id
                 ORDER BY a.name, a.id
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(AssetSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                project_id: get_opt_string(&row, 3)?,
                project_name: get_opt_string(&row, 4)?,
            });
        }
        Ok(results)
    }

    /// Asset, current project name, and named history.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset does not exist.
    pub async fn get_asset_detail(&self, asset_id: &str) -> Result<AssetDetail, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        let asset = require_asset(conn, asset_id).await?;
        let project_name = match asset.project_id.as_deref() {
            Some(project_id) => fetch_project(conn, project_id).await?.map(|p| p.name),
            None => None,
        };
        let history = history_views(conn, asset_id).await?;
        Ok(AssetDetail {
            asset,
            project_name,
            history,
        })
    }

    /// Replay the chain of custody and compare it with the stored location.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset does not exist.
    pub async fn verify_custody(&self, asset_id: &str) -> Result<CustodyCheck, DatabaseError> {
        let _read = self.db().read_guard().await;
        let conn = self.db().conn();
        let asset = require_asset(conn, asset_id).await?;
        let moves = fetch_history(conn, asset_id, HistoryOrder::OldestFirst).await?;
        let replayed_location = replay_location(&moves);
        let consistent = replayed_location == asset.project_id;
        if !consistent {
            tracing::warn!(
                asset_id,
                stored = asset.project_id.as_deref().unwrap_or("-"),
                replayed = replayed_location.as_deref().unwrap_or("-"),
                "chain of custody disagrees with stored location"
            );
        }
        Ok(CustodyCheck {
            asset_id: asset.id,
            stored_location: asset.project_id,
            replayed_location,
            consistent,
            moves: u32::try_from(moves.len()).unwrap_or(u32::MAX),
        })
    }
}
