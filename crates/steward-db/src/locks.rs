//! Per-asset move serialization.
//!
//! Moves of the same asset take turns; moves of different assets never wait
//! on each other here.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lazily-created async mutex per asset ID.
#[derive(Debug, Default)]
pub struct AssetLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AssetLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_key_lock(&self, asset_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        // Entries nobody else holds can be recreated on demand.
        locks.retain(|key, lock| key == asset_id || Arc::strong_count(lock) > 1);
        locks
            .entry(asset_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Wait for exclusive access to `asset_id`.
    pub async fn acquire(&self, asset_id: &str) -> OwnedMutexGuard<()> {
        self.get_key_lock(asset_id).await.lock_owned().await
    }

    /// Number of assets with a live lock entry.
    #[cfg(test)]
    pub(crate) async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_asset_waits() {
        let locks = Arc::new(AssetLocks::new());
        let guard = locks.acquire("ast-1").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _g = locks.acquire("ast-1").await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_assets_do_not_wait() {
        let locks = AssetLocks::new();
        let _a = locks.acquire("ast-1").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("ast-2")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = AssetLocks::new();
        for i in 0..10 {
            let _g = locks.acquire(&format!("ast-{i}")).await;
        }
        let _g = locks.acquire("ast-last").await;
        assert_eq!(locks.tracked().await, 1);
    }
}
