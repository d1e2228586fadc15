//! Time source for completion bookkeeping.
//!
//! Streak continuity is decided on local calendar dates only, so the clock
//! hands out a `NaiveDate` for "today" alongside the wall-clock instant used
//! to expire notifications.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub trait Clock {
    /// The user's local calendar date.
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a given date, for tests and `--today` overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Noon UTC on `today`.
    pub fn on(today: NaiveDate) -> Self {
        let now = Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN)) + chrono::Duration::hours(12);
        Self { today, now }
    }

    pub fn at(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self { today, now }
    }

    pub fn advance_days(&mut self, days: i64) {
        self.today += chrono::Duration::days(days);
        self.now += chrono::Duration::days(days);
    }

    pub fn advance_ms(&mut self, ms: i64) {
        self.now += chrono::Duration::milliseconds(ms);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
