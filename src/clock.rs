use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::dividends::CalendarMonth;

/// Abstraction over "current time" so the CLI's reference year and initial
/// month are deterministic in tests. The engine itself never reads a clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Year used for "dividends this year".
    fn reference_year(&self) -> i32 {
        self.today().year()
    }

    /// Month the calendar opens on.
    fn current_month(&self) -> CalendarMonth {
        CalendarMonth::of(self.today())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
