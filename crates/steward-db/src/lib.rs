//! # steward-db
//!
//! libSQL storage for Site Steward.
//!
//! Holds the relational state (projects, subcontractors, compliance documents,
//! assets and their chain of custody, users, audit trail) and hosts the
//! service layer that implements every ingress and egress operation.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.
//!
//! ## Transactions
//!
//! Every multi-record mutation runs inside one `BEGIN IMMEDIATE` transaction
//! obtained from [`StewardDb::begin_write`]. File-backed stores give each write
//! transaction a dedicated connection, so readers on the shared connection only
//! ever observe committed state. An in-memory store exists only on its single
//! connection; there, readers and writers share an async gate instead.
//!
//! File stores still queue their writers on that gate. `SQLite` admits one
//! writer per file, and a second `BEGIN IMMEDIATE` from this process would
//! wait inside the blocking busy handler, stalling a runtime worker while the
//! holder may need that worker to finish. Writers from other processes are
//! handled by the busy timeout.

pub mod custody;
pub mod error;
pub mod helpers;
pub mod locks;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::ops::Deref;
use std::time::Duration;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::{Mutex, MutexGuard};

/// Default wait for the write lock held by another process.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

const MEMORY_PATH: &str = ":memory:";

/// Central database handle for all Steward state.
///
/// Wraps a libSQL database and its shared read connection.
pub struct StewardDb {
    db: libsql::Database,
    conn: libsql::Connection,
    in_memory: bool,
    busy_timeout: Duration,
    /// The store's single writer slot, so in-process writers wait without
    /// blocking a thread. Also guards reads for in-memory stores.
    gate: Mutex<()>,
}

impl StewardDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        Self::open_local_with(path, DEFAULT_BUSY_TIMEOUT).await
    }

    /// Open a local database with an explicit busy timeout.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local_with(
        path: &str,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let in_memory = path == MEMORY_PATH;

        configure_connection(&conn, busy_timeout).await?;
        if !in_memory {
            // WAL lets the shared read connection proceed while a writer commits.
            drain(conn.query("PRAGMA journal_mode = WAL", ()).await?).await?;
        }

        let steward_db = Self {
            db,
            conn,
            in_memory,
            busy_timeout,
            gate: Mutex::new(()),
        };
        steward_db.run_migrations().await?;
        tracing::debug!(path, in_memory, "opened steward store");
        Ok(steward_db)
    }

    /// Access the shared libSQL connection for reads.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"ast-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }

    /// Hold this while reading if the store has no separate writer connections.
    pub async fn read_guard(&self) -> Option<MutexGuard<'_, ()>> {
        if self.in_memory {
            Some(self.gate.lock().await)
        } else {
            None
        }
    }

    /// Start an immediate write transaction.
    ///
    /// The returned handle holds the writer slot until it is committed or
    /// rolled back. Dropping it uncommitted rolls back.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be opened or the write
    /// lock is not obtained within the busy timeout.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.lock().await;
        let tx = if self.in_memory {
            self.conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .await?
        } else {
            let conn = self.db.connect()?;
            configure_connection(&conn, self.busy_timeout).await?;
            conn.transaction_with_behavior(TransactionBehavior::Immediate)
                .await?
        };
        Ok(WriteTx { tx, _gate: gate })
    }
}

/// An open write transaction.
///
/// Derefs to the transaction's connection so repository helpers that take a
/// `&libsql::Connection` run inside it.
pub struct WriteTx<'a> {
    tx: libsql::Transaction,
    _gate: MutexGuard<'a, ()>,
}

impl WriteTx<'_> {
    /// Commit, releasing the writer slot afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Roll back. A rollback failure is logged, not returned; the caller is
    /// already reporting the error that caused it.
    pub async fn rollback(self) {
        if let Err(e) = self.tx.rollback().await {
            tracing::warn!(error = %e, "rollback failed");
        }
    }
}

impl Deref for WriteTx<'_> {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

/// Generate a prefixed ID on a specific connection.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails or returns no rows.
pub async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

/// Per-connection settings. Foreign keys and the busy timeout are not
/// persisted by `SQLite`.
async fn configure_connection(
    conn: &libsql::Connection,
    busy_timeout: Duration,
) -> Result<(), DatabaseError> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    let millis = busy_timeout.as_millis();
    drain(
        conn.query(&format!("PRAGMA busy_timeout = {millis}"), ())
            .await?,
    )
    .await
}

async fn drain(mut rows: libsql::Rows) -> Result<(), DatabaseError> {
    while rows.next().await?.is_some() {}
    Ok(())
}
