//! Repository modules implementing the Steward operations.
//!
//! Each module adds methods to `StewardService` via `impl StewardService`
//! blocks. Row mapping and the statements shared between reads and
//! transactional writes are free functions taking a `&libsql::Connection`, so
//! they run unchanged on the shared read connection or inside a [`crate::WriteTx`].

pub mod asset;
pub mod audit;
pub mod compliance;
pub mod document;
pub mod expiry;
pub mod project;
pub mod subcontractor;
pub mod user;
