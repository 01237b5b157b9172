use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("month index {0} out of range; expected 0..=11")]
pub struct MonthError(pub i64);

/// Month of the year, zero-based (January = 0), independent of any year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CalendarMonth(u32);

const MONTH_NAMES_RU: [&str; 12] = [
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
];

impl CalendarMonth {
    pub const JANUARY: Self = Self(0);
    pub const DECEMBER: Self = Self(11);

    pub fn new(index: u32) -> Result<Self, MonthError> {
        if index < 12 {
            Ok(Self(index))
        } else {
            Err(MonthError(i64::from(index)))
        }
    }

    /// Month the given date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.month0())
    }

    pub fn index(self) -> u32 {
        self.0
    }

    /// Next month; December wraps to January.
    pub fn advance(self) -> Self {
        self.step(1)
    }

    /// Previous month; January wraps to December.
    pub fn retreat(self) -> Self {
        self.step(-1)
    }

    pub fn step(self, delta: i32) -> Self {
        let shifted = (i64::from(self.0) + i64::from(delta)).rem_euclid(12);
        Self(shifted as u32)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.month0() == self.0
    }

    /// Standalone Russian month name, lowercase ("январь").
    pub fn name_ru(self) -> &'static str {
        MONTH_NAMES_RU[self.0 as usize]
    }
}

impl TryFrom<u32> for CalendarMonth {
    type Error = MonthError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalendarMonth> for u32 {
    fn from(month: CalendarMonth) -> Self {
        month.0
    }
}
