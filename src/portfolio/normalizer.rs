//! Merge positions with their details into enriched positions.

use std::collections::HashSet;

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use super::{EnrichedPosition, Normalized, PortfolioSnapshot, PositionDetail};
use crate::diagnostics::{DataError, Diagnostics};
use crate::dividends::{DividendEvent, DividendPayment};
use crate::models::{Detail, Position};

/// Enrich every position of `snapshot`, keeping the input order.
///
/// Never fails: a missing detail yields a pending position, and malformed
/// records are excluded and reported in [`Normalized::diagnostics`].
pub fn normalize(snapshot: &PortfolioSnapshot, reference_year: i32) -> Normalized {
    let mut diagnostics = Diagnostics::new();
    let mut seen = HashSet::new();
    let mut positions = Vec::with_capacity(snapshot.positions.len());
    let mut bounds = Bounds::default();

    for position in &snapshot.positions {
        if !seen.insert(position.ticker.as_str()) {
            diagnostics.report(&position.ticker, DataError::DuplicateTicker);
            continue;
        }

        let mut enriched = match snapshot.details.get(&position.ticker) {
            Some(detail) => enrich(position, detail, reference_year, &mut diagnostics),
            None => {
                debug!(ticker = %position.ticker, "detail not loaded yet");
                EnrichedPosition::pending(position.clone())
            }
        };
        if let Some(detail) = enriched.detail.as_ref() {
            match bounds.admit(detail, &enriched.dividend_events) {
                Some(next) => bounds = next,
                None => {
                    diagnostics.report(&position.ticker, DataError::Overflow { field: "total" });
                    enriched = EnrichedPosition::pending(position.clone());
                }
            }
        }
        positions.push(enriched);
    }

    Normalized {
        positions,
        diagnostics: diagnostics.into_vec(),
    }
}

fn enrich(
    position: &Position,
    detail: &Detail,
    reference_year: i32,
    diagnostics: &mut Diagnostics,
) -> EnrichedPosition {
    let Some(validated) = validate_detail(&position.ticker, detail, diagnostics) else {
        return EnrichedPosition::pending(position.clone());
    };

    let quantity = Decimal::from(validated.quantity);
    let mut dividend_events = Vec::new();
    let mut dividends_this_year = Vec::new();
    for payment in DividendPayment::collect(&position.ticker, detail.dividends(), diagnostics) {
        let Some(amount_total) = payment.amount_per_share.checked_mul(quantity) else {
            diagnostics.report(&position.ticker, DataError::Overflow { field: "dividend" });
            continue;
        };
        dividend_events.push(DividendEvent {
            title: position.name.clone(),
            ticker: position.ticker.clone(),
            image_url: position.image_url.clone(),
            date: payment.date,
            amount_per_share: payment.amount_per_share,
            amount_total,
            quantity: validated.quantity,
            dividend_yield_percent: payment.dividend_yield_percent,
        });
        if payment.date.year() == reference_year {
            dividends_this_year.push(payment);
        }
    }
    let Some(total_dividends) = dividend_events
        .iter()
        .filter(|event| event.date.year() == reference_year)
        .try_fold(Decimal::ZERO, |acc, event| acc.checked_add(event.amount_total))
    else {
        diagnostics.report(&position.ticker, DataError::Overflow { field: "dividend" });
        return EnrichedPosition::pending(position.clone());
    };

    EnrichedPosition {
        position: position.clone(),
        total_value: Some(validated.value()),
        detail: Some(validated),
        total_dividends_this_year: Some(total_dividends),
        dividends_this_year,
        dividend_events,
    }
}

/// Running magnitudes of every figure later summed across positions.
///
/// Any sum over a subset of admitted positions (a year, a month, a table)
/// stays below these, so aggregation never overflows.
#[derive(Debug, Default)]
struct Bounds {
    value: Decimal,
    change: Decimal,
    daily_change: Decimal,
    dividends: Decimal,
}

impl Bounds {
    /// Bounds with `detail` and its events added, `None` on overflow.
    fn admit(&self, detail: &PositionDetail, events: &[DividendEvent]) -> Option<Self> {
        let dividends = events
            .iter()
            .try_fold(self.dividends, |acc, event| {
                acc.checked_add(event.amount_total.abs())
            })?;
        Some(Self {
            value: self.value.checked_add(detail.value)?,
            change: self.change.checked_add(detail.change.abs())?,
            daily_change: self.daily_change.checked_add(detail.daily_change.abs())?,
            dividends,
        })
    }
}

/// Check price and quantity; a detail failing either is excluded entirely.
fn validate_detail(
    ticker: &str,
    detail: &Detail,
    diagnostics: &mut Diagnostics,
) -> Option<PositionDetail> {
    if detail.price < Decimal::ZERO {
        diagnostics.report(
            ticker,
            DataError::NegativePrice {
                price: detail.price,
            },
        );
        return None;
    }
    let Ok(quantity) = u64::try_from(detail.quantity) else {
        diagnostics.report(
            ticker,
            DataError::NegativeQuantity {
                quantity: detail.quantity,
            },
        );
        return None;
    };

    let Some(value) = detail.price.checked_mul(Decimal::from(quantity)) else {
        diagnostics.report(ticker, DataError::Overflow { field: "value" });
        return None;
    };

    Some(PositionDetail {
        price: detail.price,
        quantity,
        value,
        change: detail.change,
        daily_change: detail.daily_change,
        change_percent: detail.change_percent,
        daily_change_percent: detail.daily_change_percent,
        dividend_yield_percent: detail.dividend_yield_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    use crate::diagnostics::Diagnostic;
    use crate::models::DividendRecord;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn details(entries: Vec<Detail>) -> HashMap<String, Detail> {
        entries
            .into_iter()
            .map(|detail| (detail.ticker.clone(), detail))
            .collect()
    }

    #[test]
    fn keeps_input_order_and_marks_missing_details_pending() {
        let snapshot = PortfolioSnapshot::new(
            vec![
                Position::new("YNDX", "Яндекс"),
                Position::new("SBER", "Сбербанк"),
            ],
            details(vec![Detail::new("SBER", d("250"), 10)]),
        );
        let normalized = normalize(&snapshot, 2024);

        assert_eq!(normalized.positions.len(), 2);
        assert_eq!(normalized.positions[0].ticker(), "YNDX");
        assert!(normalized.positions[0].is_pending());
        assert_eq!(normalized.positions[0].total_value, None);
        assert_eq!(normalized.positions[0].total_dividends_this_year, None);
        assert!(normalized.positions[0].dividend_events.is_empty());

        assert_eq!(normalized.positions[1].total_value, Some(d("2500")));
        assert_eq!(
            normalized.positions[1].total_dividends_this_year,
            Some(Decimal::ZERO)
        );
        assert!(normalized.diagnostics.is_empty());
    }

    #[test]
    fn negative_price_or_quantity_excludes_the_detail() {
        let snapshot = PortfolioSnapshot::new(
            vec![Position::new("A", "A"), Position::new("B", "B")],
            details(vec![
                Detail::new("A", d("-1"), 10),
                Detail::new("B", d("5"), -3),
            ]),
        );
        let normalized = normalize(&snapshot, 2024);

        assert!(normalized.positions.iter().all(|p| p.is_pending()));
        assert_eq!(normalized.diagnostics.len(), 2);
        assert_eq!(
            normalized.diagnostics[0].error,
            DataError::NegativePrice { price: d("-1") }
        );
        assert_eq!(
            normalized.diagnostics[1].error,
            DataError::NegativeQuantity { quantity: -3 }
        );
    }

    #[test]
    fn value_out_of_range_excludes_the_detail() {
        let snapshot = PortfolioSnapshot::new(
            vec![Position::new("HUGE", "Huge"), Position::new("OK", "Ok")],
            details(vec![
                Detail::new("HUGE", Decimal::MAX, 2),
                Detail::new("OK", d("10"), 3),
            ]),
        );
        let normalized = normalize(&snapshot, 2024);

        assert!(normalized.positions[0].is_pending());
        assert_eq!(normalized.positions[1].total_value, Some(d("30")));
        assert_eq!(
            normalized.diagnostics,
            vec![Diagnostic::new("HUGE", DataError::Overflow { field: "value" })]
        );
    }

    #[test]
    fn position_pushing_totals_out_of_range_is_excluded() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let snapshot = PortfolioSnapshot::new(
            vec![Position::new("A", "A"), Position::new("B", "B")],
            details(vec![Detail::new("A", half, 1), Detail::new("B", half, 1)]),
        );
        let normalized = normalize(&snapshot, 2024);

        assert_eq!(normalized.positions[0].total_value, Some(half));
        assert!(normalized.positions[1].is_pending());
        assert_eq!(
            normalized.diagnostics[0].error,
            DataError::Overflow { field: "total" }
        );
    }

    #[test]
    fn dividend_out_of_range_is_dropped() {
        let detail = Detail::new("A", d("1"), 2).with_dividends(vec![
            DividendRecord::new("2024-05-01", Decimal::MAX),
            DividendRecord::new("2024-06-01", d("3")),
        ]);
        let snapshot = PortfolioSnapshot::new(vec![Position::new("A", "A")], details(vec![detail]));
        let normalized = normalize(&snapshot, 2024);
        let enriched = &normalized.positions[0];

        assert_eq!(enriched.dividend_events.len(), 1);
        assert_eq!(enriched.dividends_this_year.len(), 1);
        assert_eq!(enriched.total_dividends_this_year, Some(d("6")));
        assert_eq!(
            normalized.diagnostics[0].error,
            DataError::Overflow { field: "dividend" }
        );
    }

    #[test]
    fn duplicate_tickers_are_counted_once() {
        let snapshot = PortfolioSnapshot::new(
            vec![Position::new("A", "First"), Position::new("A", "Second")],
            details(vec![Detail::new("A", d("2"), 3)]),
        );
        let normalized = normalize(&snapshot, 2024);

        assert_eq!(normalized.positions.len(), 1);
        assert_eq!(normalized.positions[0].position.name, "First");
        assert_eq!(normalized.diagnostics[0].error, DataError::DuplicateTicker);
    }

    #[test]
    fn events_are_scaled_and_tagged() {
        let position = Position::new("MTSS", "МТС").with_image_url("https://img/mtss.png");
        let detail = Detail::new("MTSS", d("230"), 30).with_dividends(vec![
            DividendRecord::new("2024-07-20", d("35")).with_yield(d("15.2")),
            DividendRecord::new("2023-07-20", d("34.29")),
        ]);
        let snapshot = PortfolioSnapshot::new(vec![position], details(vec![detail]));
        let normalized = normalize(&snapshot, 2024);
        let enriched = &normalized.positions[0];

        assert_eq!(enriched.dividend_events.len(), 2);
        let latest = &enriched.dividend_events[1];
        assert_eq!(latest.title, "МТС");
        assert_eq!(latest.image_url.as_deref(), Some("https://img/mtss.png"));
        assert_eq!(latest.amount_total, d("1050"));
        assert_eq!(latest.quantity, 30);
        assert_eq!(latest.dividend_yield_percent, Some(d("15.2")));

        assert_eq!(enriched.total_dividends_this_year, Some(d("1050")));
        assert_eq!(enriched.dividends_this_year.len(), 1);
        assert_eq!(enriched.dividends_this_year[0].amount_per_share, d("35"));
    }

    #[test]
    fn zero_quantity_is_known_not_pending() {
        let snapshot = PortfolioSnapshot::new(
            vec![Position::new("A", "A")],
            details(vec![Detail::new("A", d("99"), 0)]),
        );
        let normalized = normalize(&snapshot, 2024);
        assert!(!normalized.positions[0].is_pending());
        assert_eq!(normalized.positions[0].total_value, Some(Decimal::ZERO));
    }
}
