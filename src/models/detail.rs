use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::diagnostics::DataError;

/// Market and holding data for one ticker, as returned by the backend.
///
/// Values are taken as-is; validation happens when the detail is merged into
/// an enriched position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub ticker: String,
    pub price: Decimal,
    pub quantity: i64,
    /// All-time change of the position value.
    #[serde(default)]
    pub change: Decimal,
    /// Change of the position value since the previous close.
    #[serde(default)]
    pub daily_change: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_change_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<Decimal>,
    /// Dividend history. The backend omits it (or sends `null`) for
    /// instruments that never paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividends: Option<Vec<DividendRecord>>,
}

impl Detail {
    pub fn new(ticker: impl Into<String>, price: Decimal, quantity: i64) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            quantity,
            change: Decimal::ZERO,
            daily_change: Decimal::ZERO,
            change_percent: None,
            daily_change_percent: None,
            dividend_yield_percent: None,
            dividends: None,
        }
    }

    pub fn with_changes(mut self, change: Decimal, daily_change: Decimal) -> Self {
        self.change = change;
        self.daily_change = daily_change;
        self
    }

    pub fn with_dividends(mut self, dividends: Vec<DividendRecord>) -> Self {
        self.dividends = Some(dividends);
        self
    }

    pub fn dividends(&self) -> &[DividendRecord] {
        self.dividends.as_deref().unwrap_or(&[])
    }
}

/// One dividend payment of a ticker, per share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendRecord {
    /// Payment date as sent by the backend (ISO-8601).
    pub date: String,
    #[serde(rename = "amount")]
    pub amount_per_share: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_buy_date: Option<String>,
}

impl DividendRecord {
    pub fn new(date: impl Into<String>, amount_per_share: Decimal) -> Self {
        Self {
            date: date.into(),
            amount_per_share,
            dividend_yield_percent: None,
            last_buy_date: None,
        }
    }

    pub fn with_yield(mut self, dividend_yield_percent: Decimal) -> Self {
        self.dividend_yield_percent = Some(dividend_yield_percent);
        self
    }

    pub fn with_last_buy_date(mut self, last_buy_date: impl Into<String>) -> Self {
        self.last_buy_date = Some(last_buy_date.into());
        self
    }
}

/// Parse a backend date into a calendar date.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps (the calendar date as
/// written, offset ignored) and naive `YYYY-MM-DDTHH:MM:SS` timestamps.
pub fn parse_record_date(field: &'static str, value: &str) -> Result<NaiveDate, DataError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.naive_local().date());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    Err(DataError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Sector classification reported on the stock details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub title: String,
}

/// Full record for one ticker as shown on the stock details screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    pub ticker: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_risk: Option<String>,
    pub current_price: Decimal,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividends: Option<Vec<DividendRecord>>,
}

impl StockDetail {
    pub fn dividends(&self) -> &[DividendRecord] {
        self.dividends.as_deref().unwrap_or(&[])
    }
}
