//! Shared test utilities for steward-db unit tests.

use std::sync::Arc;

use chrono::NaiveDate;
use steward_core::clock::FixedClock;

use crate::StewardDb;
use crate::service::StewardService;

/// The date every test clock starts on.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

/// In-memory service on a fixed clock. The returned clock handle can be
/// advanced by the test.
pub async fn test_service_with_clock() -> (StewardService, FixedClock) {
    let clock = FixedClock::at_date(test_today());
    let db = StewardDb::open_local(":memory:").await.unwrap();
    let svc = StewardService::from_db(db, Arc::new(clock.clone()));
    (svc, clock)
}

pub async fn test_service() -> StewardService {
    test_service_with_clock().await.0
}
