use serde::Serialize;

use crate::diagnostics::Diagnostic;

/// JSON output for a data problem found in the snapshot
#[derive(Debug, Serialize)]
pub struct DiagnosticOutput {
    pub ticker: String,
    pub error: String,
}

impl From<&Diagnostic> for DiagnosticOutput {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            ticker: diagnostic.ticker.clone(),
            error: diagnostic.error.to_string(),
        }
    }
}

/// JSON output for the change shown by the summary card
#[derive(Debug, Serialize)]
pub struct ChangeOutput {
    pub mode: String,
    pub caption: String,
    pub change: String,
    pub change_percent: String,
    pub change_display: String,
    pub change_percent_display: String,
}

/// JSON output for portfolio totals
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub total_value: String,
    pub total_value_display: String,
    pub change: ChangeOutput,
    pub dividends_year: i32,
    pub total_dividends: String,
    pub total_dividends_display: String,
    pub position_count: usize,
    pub pending_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticOutput>,
}

/// JSON output for one row of the positions table
#[derive(Debug, Serialize)]
pub struct PositionOutput {
    pub ticker: String,
    pub name: String,
    pub instrument_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// False while the detail has not loaded.
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<ChangeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_dividends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_dividends_display: Option<String>,
    pub dividends_this_year: Vec<PaymentOutput>,
}

#[derive(Debug, Serialize)]
pub struct PositionsOutput {
    pub sort: String,
    pub direction: String,
    pub positions: Vec<PositionOutput>,
}

/// JSON output for a per-share dividend payment
#[derive(Debug, Serialize)]
pub struct PaymentOutput {
    pub date: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_buy_date: Option<String>,
}

/// JSON output for a dividend calendar entry
#[derive(Debug, Serialize)]
pub struct CalendarEventOutput {
    pub title: String,
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub date: String,
    pub quantity: u64,
    pub amount_per_share: String,
    pub amount_total: String,
    pub amount_total_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarOutput {
    /// Zero-based month index.
    pub month: u32,
    pub month_name: String,
    pub total: String,
    pub total_display: String,
    pub events: Vec<CalendarEventOutput>,
}

#[derive(Debug, Serialize)]
pub struct PositionDividendsOutput {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    pub payment_count: usize,
}

#[derive(Debug, Serialize)]
pub struct YearDividendsOutput {
    pub year: i32,
    pub total: String,
    pub total_display: String,
    pub by_position: Vec<PositionDividendsOutput>,
}

#[derive(Debug, Serialize)]
pub struct ChartPointOutput {
    pub date: String,
    pub amount: String,
}

/// JSON output for the stock details screen
#[derive(Debug, Serialize)]
pub struct StockOutput {
    pub ticker: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_risk: Option<String>,
    pub current_price: String,
    pub current_price_display: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding_value_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_amount: Option<String>,
    pub history: Vec<PaymentOutput>,
    pub chart: Vec<ChartPointOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticOutput>,
}
