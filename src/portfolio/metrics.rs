//! Value and change figures over enriched positions.
//!
//! Figures are exact decimals; rounding only happens when they are formatted.

use rust_decimal::Decimal;

use super::{EnrichedPosition, PortfolioTotals};
use crate::dividends::dividends_for_year;

/// Value of one position, `None` while its detail is unknown.
pub fn position_value(position: &EnrichedPosition) -> Option<Decimal> {
    position.total_value
}

/// Sum of known position values. Pending positions contribute nothing.
pub fn portfolio_total_value(positions: &[EnrichedPosition]) -> Decimal {
    positions.iter().filter_map(position_value).sum()
}

pub fn total_change(positions: &[EnrichedPosition]) -> Decimal {
    positions
        .iter()
        .filter_map(|p| p.detail.as_ref())
        .map(|detail| detail.change)
        .sum()
}

pub fn daily_change(positions: &[EnrichedPosition]) -> Decimal {
    positions
        .iter()
        .filter_map(|p| p.detail.as_ref())
        .map(|detail| detail.daily_change)
        .sum()
}

/// `change / total × 100`, or zero when `total` is zero.
pub fn change_percent(change: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    change
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Every portfolio-wide figure, with dividends counted for `dividends_year`.
pub fn portfolio_totals(positions: &[EnrichedPosition], dividends_year: i32) -> PortfolioTotals {
    let total_value = portfolio_total_value(positions);
    let change = total_change(positions);
    let daily = daily_change(positions);

    PortfolioTotals {
        total_value,
        change,
        change_percent: change_percent(change, total_value),
        daily_change: daily,
        daily_change_percent: change_percent(daily, total_value),
        dividends_year,
        total_dividends: dividends_for_year(positions, dividends_year).total,
        position_count: positions.len(),
        pending_count: positions.iter().filter(|p| p.is_pending()).count(),
    }
}
