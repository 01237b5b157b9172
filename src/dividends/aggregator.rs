//! Year and month buckets over enriched positions.

use chrono::Datelike;
use rust_decimal::Decimal;

use super::{CalendarMonth, DividendEvent, MonthDividends, PositionDividends, YearDividends};
use crate::portfolio::EnrichedPosition;

/// Sum of a position's events paid in `year`, with the number of payments.
pub fn position_dividends_for_year(events: &[DividendEvent], year: i32) -> (Decimal, usize) {
    events
        .iter()
        .filter(|event| event.date.year() == year)
        .fold((Decimal::ZERO, 0), |(total, count), event| {
            (total + event.amount_total, count + 1)
        })
}

/// Dividends received in `year`, per position and in total.
///
/// Positions without a known detail are listed with an unknown total and add
/// nothing to the overall total.
pub fn dividends_for_year(positions: &[EnrichedPosition], year: i32) -> YearDividends {
    let by_position: Vec<PositionDividends> = positions
        .iter()
        .map(|position| {
            if position.is_pending() {
                return PositionDividends {
                    ticker: position.position.ticker.clone(),
                    total: None,
                    payment_count: 0,
                };
            }
            let (total, payment_count) =
                position_dividends_for_year(&position.dividend_events, year);
            PositionDividends {
                ticker: position.position.ticker.clone(),
                total: Some(total),
                payment_count,
            }
        })
        .collect();

    let total: Decimal = by_position.iter().filter_map(|entry| entry.total).sum();

    YearDividends {
        year,
        total,
        by_position,
    }
}

/// Every dividend event of every position, oldest first.
///
/// Events sharing a date keep the order of their positions.
pub fn calendar_events(positions: &[EnrichedPosition]) -> Vec<DividendEvent> {
    let mut events: Vec<DividendEvent> = positions
        .iter()
        .flat_map(|position| position.dividend_events.iter().cloned())
        .collect();
    events.sort_by_key(|event| event.date);
    events
}

/// Events paid in `month` of any year, with their total.
///
/// The bucket is year-agnostic: March 2023 and March 2024 land together.
pub fn dividends_for_month(events: &[DividendEvent], month: CalendarMonth) -> MonthDividends {
    let events: Vec<DividendEvent> = events
        .iter()
        .filter(|event| month.contains(event.date))
        .cloned()
        .collect();
    let total: Decimal = events.iter().map(|event| event.amount_total).sum();
    MonthDividends {
        month,
        total,
        events,
    }
}
