//! Service layer orchestrating database mutations with audit.
//!
//! `StewardService` wraps `StewardDb` (raw database access), the injected
//! [`Clock`], and the per-asset move locks. All repo methods are implemented
//! as `impl StewardService` blocks in [`crate::repos`].
//!
//! Every mutation method follows this protocol:
//! 1. Begin an immediate transaction
//! 2. Validate references and execute SQL
//! 3. Append the audit entry (inside the transaction)
//! 4. Commit, or roll back on any error

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use steward_config::DatabaseConfig;
use steward_core::clock::{Clock, SystemClock};

use crate::StewardDb;
use crate::WriteTx;
use crate::error::DatabaseError;
use crate::locks::AssetLocks;

pub struct StewardService {
    db: StewardDb,
    clock: Arc<dyn Clock>,
    asset_locks: AssetLocks,
}

impl StewardService {
    /// Open a service on a local database with the system clock.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = StewardDb::open_local(db_path).await?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Open the store described by a `[database]` config section.
    ///
    /// Creates the parent directory of a file-backed store if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory or database cannot be created.
    pub async fn from_config(
        config: &DatabaseConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DatabaseError> {
        if let Some(parent) = config.parent_dir() {
            std::fs::create_dir_all(&parent)?;
        }
        let db = StewardDb::open_local_with(
            &config.path,
            Duration::from_millis(config.busy_timeout_ms),
        )
        .await?;
        Ok(Self::from_db(db, clock))
    }

    /// Create from an existing `StewardDb` and clock.
    #[must_use]
    pub fn from_db(db: StewardDb, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            asset_locks: AssetLocks::new(),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &StewardDb {
        &self.db
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) const fn asset_locks(&self) -> &AssetLocks {
        &self.asset_locks
    }

    /// Commit `tx` when `result` is `Ok`, otherwise roll back and pass the
    /// error through.
    pub(crate) async fn finish<T>(
        tx: WriteTx<'_>,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = %e.kind(), "rolling back write");
                tx.rollback().await;
                Err(e)
            }
        }
    }
}
