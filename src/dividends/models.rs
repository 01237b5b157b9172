use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::CalendarMonth;
use crate::diagnostics::Diagnostics;
use crate::models::{parse_record_date, DividendRecord};

/// A validated per-share dividend payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendPayment {
    pub date: NaiveDate,
    pub amount_per_share: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_buy_date: Option<NaiveDate>,
}

impl DividendPayment {
    /// Validate raw records of `ticker`, returning payments in chronological
    /// order. Records with an unparseable payment date are dropped and
    /// reported; an unparseable last-buy date only loses that field.
    pub fn collect(
        ticker: &str,
        records: &[DividendRecord],
        diagnostics: &mut Diagnostics,
    ) -> Vec<Self> {
        let mut payments: Vec<Self> = records
            .iter()
            .filter_map(|record| Self::from_record(ticker, record, diagnostics))
            .collect();
        // Backends usually send these ordered, but not always.
        payments.sort_by_key(|payment| payment.date);
        payments
    }

    fn from_record(
        ticker: &str,
        record: &DividendRecord,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let date = match parse_record_date("date", &record.date) {
            Ok(date) => date,
            Err(err) => {
                diagnostics.report(ticker, err);
                return None;
            }
        };
        let last_buy_date = match record.last_buy_date.as_deref() {
            Some(raw) => match parse_record_date("last_buy_date", raw) {
                Ok(date) => Some(date),
                Err(err) => {
                    diagnostics.report(ticker, err);
                    None
                }
            },
            None => None,
        };
        Some(Self {
            date,
            amount_per_share: record.amount_per_share,
            dividend_yield_percent: record.dividend_yield_percent,
            last_buy_date,
        })
    }
}

/// A payment scaled by the held quantity, tagged for calendar display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DividendEvent {
    /// Instrument name.
    pub title: String,
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub amount_per_share: Decimal,
    /// `amount_per_share × quantity`; consumers never re-multiply.
    pub amount_total: Decimal,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<Decimal>,
}

/// Dividends of one position within a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionDividends {
    pub ticker: String,
    /// `None` while the position's detail is unknown.
    pub total: Option<Decimal>,
    pub payment_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearDividends {
    pub year: i32,
    pub total: Decimal,
    pub by_position: Vec<PositionDividends>,
}

/// Calendar bucket: every event paid in `month`, across all years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthDividends {
    pub month: CalendarMonth,
    pub total: Decimal,
    pub events: Vec<DividendEvent>,
}

impl MonthDividends {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
