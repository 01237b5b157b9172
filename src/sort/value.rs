use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::collation::compare_ru;

/// A field value extracted for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    /// Unknown or absent; the smallest value of all.
    Missing,
    Number(Decimal),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    pub fn number(value: Option<Decimal>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }

    pub fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Missing, Self::Date)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => compare_ru(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
