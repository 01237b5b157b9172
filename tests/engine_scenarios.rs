use std::collections::HashMap;

use divbook::dividends::{calendar_events, dividends_for_month, CalendarMonth};
use divbook::models::{Detail, DividendRecord, Position};
use divbook::portfolio::{PortfolioEngine, PortfolioSnapshot};
use divbook::sort::SortSpec;
use divbook::view::{ViewMode, ViewProjection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

mod support;
use support::d;

fn random_snapshot(rng: &mut StdRng) -> PortfolioSnapshot {
    let count = rng.gen_range(0..40);
    let mut positions = Vec::with_capacity(count);
    let mut details = HashMap::new();
    for i in 0..count {
        let ticker = format!("T{i:03}");
        positions.push(Position::new(ticker.clone(), format!("Бумага {i}")));
        // Roughly one in five positions is still loading.
        if rng.gen_range(0..5) == 0 {
            continue;
        }
        let price = Decimal::new(rng.gen_range(0..10_000_000), 4);
        let quantity = rng.gen_range(0..5_000);
        let change = Decimal::new(rng.gen_range(-1_000_000..1_000_000), 2);
        let daily = Decimal::new(rng.gen_range(-100_000..100_000), 2);
        let dividends = (0..rng.gen_range(0..4))
            .map(|_| {
                let year = rng.gen_range(2021..=2025);
                let month = rng.gen_range(1..=12);
                let day = rng.gen_range(1..=28);
                DividendRecord::new(
                    format!("{year}-{month:02}-{day:02}"),
                    Decimal::new(rng.gen_range(0..50_000), 2),
                )
            })
            .collect();
        details.insert(
            ticker.clone(),
            Detail::new(ticker, price, quantity)
                .with_changes(change, daily)
                .with_dividends(dividends),
        );
    }
    PortfolioSnapshot::new(positions, details)
}

#[test]
fn position_values_sum_to_portfolio_total() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let snapshot = random_snapshot(&mut rng);
        let engine = PortfolioEngine::new(&snapshot, 2024);

        let sum: Decimal = engine
            .positions()
            .iter()
            .filter_map(|p| p.total_value)
            .sum();
        assert_eq!(sum, engine.portfolio_totals().total_value);

        let sorted_sum: Decimal = engine
            .sorted_positions(&SortSpec::descending("totalValue"))
            .iter()
            .filter_map(|p| p.total_value)
            .sum();
        assert_eq!(sorted_sum, engine.portfolio_totals().total_value);
    }
}

#[test]
fn month_buckets_partition_all_events() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let engine = PortfolioEngine::new(&random_snapshot(&mut rng), 2024);
        let events = calendar_events(engine.positions());

        let mut bucketed = 0;
        let mut total = Decimal::ZERO;
        let mut month = CalendarMonth::JANUARY;
        for _ in 0..12 {
            let bucket = engine.dividends_for_month(month);
            assert_eq!(dividends_for_month(&bucket.events, month), bucket);
            bucketed += bucket.events.len();
            total += bucket.total;
            month = month.advance();
        }
        assert_eq!(month, CalendarMonth::JANUARY);
        assert_eq!(bucketed, events.len());
        assert_eq!(total, events.iter().map(|e| e.amount_total).sum::<Decimal>());
    }
}

#[test]
fn change_percent_is_zero_when_everything_is_worthless() {
    let positions = vec![Position::new("A", "A"), Position::new("B", "B")];
    let details = vec![
        Detail::new("A", Decimal::ZERO, 10).with_changes(d("-100"), d("-3")),
        Detail::new("B", d("15"), 0).with_changes(d("7"), d("1")),
    ];
    let engine = PortfolioEngine::new(&PortfolioSnapshot::from_detail_list(positions, details), 2024);
    let totals = engine.portfolio_totals();

    assert_eq!(totals.total_value, Decimal::ZERO);
    assert_eq!(totals.change, d("-93"));
    assert_eq!(totals.change_percent, Decimal::ZERO);
    assert_eq!(totals.daily_change_percent, Decimal::ZERO);
}

#[test]
fn today_and_all_time_surface_different_figures_without_recomputing() {
    let positions = vec![Position::new("AAPL", "Apple")];
    let details = vec![Detail::new("AAPL", d("150"), 10)
        .with_changes(d("50"), d("5"))
        .with_dividends(vec![DividendRecord::new("2024-03-15", d("1.0"))])];
    let engine = PortfolioEngine::new(&PortfolioSnapshot::from_detail_list(positions, details), 2024);

    let view = ViewProjection::new(ViewMode::Today, CalendarMonth::new(2).unwrap());
    let today = engine.change_view(&view);
    let all_time = engine.change_view(&engine.set_view_mode(view, ViewMode::AllTime));

    assert_eq!(today.change, d("5"));
    assert_eq!(today.change_percent.round_dp(3), d("0.333"));
    assert_eq!(all_time.change, d("50"));
    assert_eq!(all_time.change_percent.round_dp(3), d("3.333"));
    assert_eq!(engine.month_view(&view).total, d("10"));
}

#[test]
fn empty_portfolio_yields_empty_aggregates() {
    let engine = PortfolioEngine::new(&PortfolioSnapshot::default(), 2024);
    let totals = engine.portfolio_totals();

    assert_eq!(totals.total_value, Decimal::ZERO);
    assert_eq!(totals.total_dividends, Decimal::ZERO);
    assert_eq!(totals.position_count, 0);
    assert!(engine.sorted_positions(&SortSpec::ascending("name")).is_empty());
    assert!(engine.dividends_for_month(CalendarMonth::JANUARY).is_empty());
    assert!(engine.dividends_for_year(2024).by_position.is_empty());
}

#[test]
fn malformed_details_are_reported_not_counted() {
    let positions = vec![
        Position::new("GOOD", "Good"),
        Position::new("NEG", "Negative"),
        Position::new("GOOD", "Duplicate"),
    ];
    let details = vec![
        Detail::new("GOOD", d("10"), 3)
            .with_dividends(vec![DividendRecord::new("not a date", d("1"))]),
        Detail::new("NEG", d("10"), -3),
    ];
    let engine = PortfolioEngine::new(&PortfolioSnapshot::from_detail_list(positions, details), 2024);

    assert_eq!(engine.positions().len(), 2);
    assert_eq!(engine.portfolio_totals().total_value, d("30"));
    assert_eq!(engine.portfolio_totals().pending_count, 1);
    assert_eq!(engine.diagnostics().len(), 3);
}
