use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics::change_percent;
use crate::diagnostics::Diagnostic;
use crate::dividends::{DividendEvent, DividendPayment};
use crate::models::{Detail, Position};

/// One complete set of positions and details handed over by a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Details keyed by ticker. Tickers may be missing while loading.
    #[serde(default)]
    pub details: HashMap<String, Detail>,
}

impl PortfolioSnapshot {
    pub fn new(positions: Vec<Position>, details: HashMap<String, Detail>) -> Self {
        Self { positions, details }
    }

    /// Build a snapshot from a detail list, keying each detail by its ticker.
    pub fn from_detail_list(positions: Vec<Position>, details: Vec<Detail>) -> Self {
        let details = details
            .into_iter()
            .map(|detail| (detail.ticker.clone(), detail))
            .collect();
        Self { positions, details }
    }

    pub fn tickers(&self) -> Vec<String> {
        self.positions.iter().map(|p| p.ticker.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Validated detail of a position: non-negative price and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionDetail {
    pub price: Decimal,
    pub quantity: u64,
    /// `price × quantity`, checked when the detail was validated.
    pub value: Decimal,
    pub change: Decimal,
    pub daily_change: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_change_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield_percent: Option<Decimal>,
}

impl PositionDetail {
    /// The single definition of a position's value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// All-time change percent as reported, or derived from the value.
    pub fn effective_change_percent(&self) -> Decimal {
        self.change_percent
            .unwrap_or_else(|| change_percent(self.change, self.value()))
    }

    /// Daily change percent as reported, or derived from the value.
    pub fn effective_daily_change_percent(&self) -> Decimal {
        self.daily_change_percent
            .unwrap_or_else(|| change_percent(self.daily_change, self.value()))
    }
}

/// A position merged with its detail plus derived figures.
///
/// Every derived numeric field is `None` while the detail is unknown, which
/// keeps "no data yet" apart from a genuine zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedPosition {
    pub position: Position,
    pub detail: Option<PositionDetail>,
    pub total_value: Option<Decimal>,
    /// Dividends received in the reference year, scaled by quantity.
    pub total_dividends_this_year: Option<Decimal>,
    /// Per-share payments in the reference year, oldest first.
    pub dividends_this_year: Vec<DividendPayment>,
    /// All payments scaled by quantity, oldest first.
    pub dividend_events: Vec<DividendEvent>,
}

impl EnrichedPosition {
    pub fn pending(position: Position) -> Self {
        Self {
            position,
            detail: None,
            total_value: None,
            total_dividends_this_year: None,
            dividends_this_year: Vec::new(),
            dividend_events: Vec::new(),
        }
    }

    /// True while the position has no usable detail.
    pub fn is_pending(&self) -> bool {
        self.detail.is_none()
    }

    pub fn ticker(&self) -> &str {
        &self.position.ticker
    }
}

/// Result of one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub positions: Vec<EnrichedPosition>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Portfolio-wide figures for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub daily_change: Decimal,
    pub daily_change_percent: Decimal,
    pub dividends_year: i32,
    pub total_dividends: Decimal,
    pub position_count: usize,
    /// Positions still waiting for their detail.
    pub pending_count: usize,
}
