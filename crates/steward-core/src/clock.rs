//! Time sources.
//!
//! Status rules take `today` as an argument; the service layer obtains it from
//! an injected [`Clock`]. Production uses [`SystemClock`], tests use
//! [`FixedClock`].

use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current wall-clock time in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for deterministic tests.
///
/// Clones share the same instant, so a test can hold one handle and advance
/// the clock seen by a service that owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// A clock pinned to midday UTC on `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        Self::new(noon.and_utc())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = self
            .now
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self
            .now
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self
            .now
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn clones_share_the_instant() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let clock = FixedClock::at_date(date);
        let handle = clock.clone();
        handle.advance(chrono::Duration::days(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    }
}
