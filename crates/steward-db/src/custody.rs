//! Chain-of-custody export.
//!
//! Writes an asset's move records, oldest first, as JSON Lines to
//! `{dir}/{asset_id}.jsonl`. Each run replaces the previous export for that
//! asset; the database stays the source of truth.

use std::path::Path;

use steward_core::responses::CustodyExport;

use crate::error::DatabaseError;
use crate::repos::asset::{HistoryOrder, fetch_history, require_asset};
use crate::service::StewardService;

/// File name of an asset's custody export.
#[must_use]
pub fn export_file_name(asset_id: &str) -> String {
    format!("{asset_id}.jsonl")
}

impl StewardService {
    /// Export an asset's chain of custody.
    ///
    /// # Errors
    ///
    /// `NotFound` when the asset does not exist, `Io` when the directory or
    /// file cannot be written.
    pub async fn export_custody(
        &self,
        asset_id: &str,
        dir: &Path,
    ) -> Result<CustodyExport, DatabaseError> {
        let moves = {
            let _read = self.db().read_guard().await;
            let conn = self.db().conn();
            require_asset(conn, asset_id).await?;
            fetch_history(conn, asset_id, HistoryOrder::OldestFirst).await?
        };

        let records = u32::try_from(moves.len()).unwrap_or(u32::MAX);
        let dir = dir.to_path_buf();
        let path = dir.join(export_file_name(asset_id));
        let target = path.clone();
        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir)?;
            serde_jsonlines::write_json_lines(&target, &moves)
        })
        .await
        .map_err(|e| DatabaseError::Other(e.into()))??;
        tracing::debug!(asset_id, path = %path.display(), records, "exported custody");

        Ok(CustodyExport {
            asset_id: asset_id.to_string(),
            path: path.display().to_string(),
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;
    use steward_core::entities::AssetMove;
    use steward_core::errors::ErrorKind;

    #[tokio::test]
    async fn export_writes_oldest_first() {
        let svc = test_service().await;
        let p1 = svc.create_project("P1", None).await.unwrap();
        let p2 = svc.create_project("P2", None).await.unwrap();
        let asset = svc.create_asset("Generator", "Plant").await.unwrap();
        let first = svc.move_asset(&asset.id, &p1.id, None).await.unwrap();
        let second = svc.move_asset(&asset.id, &p2.id, None).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let export = svc.export_custody(&asset.id, dir.path()).await.unwrap();
        assert_eq!(export.records, 2);

        let written: Vec<AssetMove> = serde_jsonlines::json_lines(&export.path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(written, vec![first, second]);
    }

    #[tokio::test]
    async fn export_creates_missing_directory() {
        let svc = test_service().await;
        let asset = svc.create_asset("Generator", "Plant").await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("custody").join("2026");

        let export = svc.export_custody(&asset.id, &nested).await.unwrap();
        assert_eq!(export.records, 0);
        assert!(nested.join(export_file_name(&asset.id)).exists());
    }

    #[tokio::test]
    async fn export_under_a_regular_file_is_io_error() {
        let svc = test_service().await;
        let asset = svc.create_asset("Generator", "Plant").await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("custody");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = svc
            .export_custody(&asset.id, &blocker.join("2026"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Io(_)), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn export_of_missing_asset_is_not_found() {
        let svc = test_service().await;
        let dir = tempfile::tempdir().unwrap();
        let err = svc
            .export_custody("ast-00000000", dir.path())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
