//! Concurrency properties of the asset ledger on a file-backed store.
//!
//! In-memory stores share one connection, so these tests use a temp file to
//! exercise separate writer connections.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use steward_db::service::StewardService;

async fn file_service(dir: &tempfile::TempDir) -> Arc<StewardService> {
    let path = dir.path().join("steward.db");
    Arc::new(
        StewardService::new_local(path.to_str().unwrap())
            .await
            .unwrap(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_of_one_asset_are_all_recorded() {
    const MOVES: usize = 24;
    let dir = tempfile::tempdir().unwrap();
    let svc = file_service(&dir).await;

    let mut projects = Vec::new();
    for i in 0..4 {
        projects.push(svc.create_project(&format!("P{i}"), None).await.unwrap().id);
    }
    let asset = svc.create_asset("Tower crane", "Plant").await.unwrap();

    let mut handles = Vec::new();
    for i in 0..MOVES {
        let svc = Arc::clone(&svc);
        let asset_id = asset.id.clone();
        let project_id = projects[i % projects.len()].clone();
        handles.push(tokio::spawn(async move {
            svc.move_asset(&asset_id, &project_id, None).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = svc.asset_history(&asset.id).await.unwrap();
    assert_eq!(history.len(), MOVES);

    // Final location is the last committed move.
    let stored = svc.get_asset(&asset.id).await.unwrap().project_id;
    assert_eq!(stored.as_deref(), Some(history[0].project_id.as_str()));

    let check = svc.verify_custody(&asset.id).await.unwrap();
    assert!(check.consistent);
    assert_eq!(check.moves as usize, MOVES);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn moves_of_different_assets_do_not_interfere() {
    let dir = tempfile::tempdir().unwrap();
    let svc = file_service(&dir).await;
    let project = svc.create_project("Yard", None).await.unwrap();

    let mut assets = Vec::new();
    for i in 0..8 {
        assets.push(svc.create_asset(&format!("Pump {i}"), "Plant").await.unwrap().id);
    }

    let mut handles = Vec::new();
    for asset_id in assets.clone() {
        let svc = Arc::clone(&svc);
        let project_id = project.id.clone();
        handles.push(tokio::spawn(async move {
            svc.move_asset(&asset_id, &project_id, None).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let here = svc.assets_at_project(&project.id).await.unwrap();
    assert_eq!(here.len(), assets.len());
    for asset_id in &assets {
        assert_eq!(svc.asset_history(asset_id).await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let (asset_id, project_id) = {
        let svc = file_service(&dir).await;
        let project = svc.create_project("P1", None).await.unwrap();
        let asset = svc.create_asset("Lift", "Plant").await.unwrap();
        svc.move_asset(&asset.id, &project.id, None).await.unwrap();
        (asset.id, project.id)
    };

    let svc = file_service(&dir).await;
    let asset = svc.get_asset(&asset_id).await.unwrap();
    assert_eq!(asset.project_id, Some(project_id));
    assert_eq!(svc.asset_history(&asset_id).await.unwrap().len(), 1);
}
