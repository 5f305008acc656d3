//! Source of "now" for the store.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime};

pub trait Clock {
    /// Current instant, carrying the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Clock set to noon UTC on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = (date.and_time(NaiveTime::MIN) + Duration::hours(12))
            .and_utc()
            .fixed_offset();
        Self { now: noon }
    }

    pub fn set(&mut self, now: DateTime<FixedOffset>) {
        self.now = now;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
