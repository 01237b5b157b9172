use anyhow::Result;
use divbook::dividends::CalendarMonth;
use divbook::models::InstrumentType;
use divbook::portfolio::PortfolioEngine;
use divbook::sort::SortSpec;
use divbook::source::{fetch_snapshot, JsonFileSource, PortfolioDataSource};
use divbook::stock::StockHistory;
use tempfile::TempDir;

mod support;
use support::{d, write_data_dir};

#[tokio::test]
async fn loads_snapshot_and_reconciles_totals() -> Result<()> {
    let dir = TempDir::new()?;
    write_data_dir(dir.path())?;

    let source = JsonFileSource::new(dir.path());
    let snapshot = fetch_snapshot(&source).await?;
    assert_eq!(snapshot.positions.len(), 4);
    assert_eq!(snapshot.details.len(), 3);

    let engine = PortfolioEngine::new(&snapshot, 2024);
    let totals = engine.portfolio_totals();
    assert_eq!(totals.total_value, d("50000"));
    assert_eq!(totals.change, d("1200"));
    assert_eq!(totals.change_percent, d("2.4"));
    assert_eq!(totals.daily_change, d("-160"));
    assert_eq!(totals.daily_change_percent, d("-0.32"));
    assert_eq!(totals.total_dividends, d("5220"));
    assert_eq!(totals.pending_count, 1);

    let july = engine.dividends_for_month(CalendarMonth::new(6)?);
    assert_eq!(july.events.len(), 2);
    assert_eq!(july.total, d("5830"));

    let table = engine.table_positions(
        &SortSpec::descending("totalValue"),
        &[InstrumentType::Share],
    );
    let tickers: Vec<&str> = table.iter().map(|p| p.ticker()).collect();
    assert_eq!(tickers, vec!["SBER", "LKOH", "MOEX"]);

    Ok(())
}

#[tokio::test]
async fn details_file_may_be_a_map() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("positions.json"),
        r#"[{"ticker":"SBER","name":"Сбербанк"}]"#,
    )?;
    std::fs::write(
        dir.path().join("details.json"),
        r#"{"SBER":{"ticker":"SBER","price":"300.5","quantity":2},
            "GAZP":{"ticker":"GAZP","price":150,"quantity":1}}"#,
    )?;

    let snapshot = fetch_snapshot(&JsonFileSource::new(dir.path())).await?;
    assert_eq!(snapshot.details.len(), 1);
    assert_eq!(snapshot.details["SBER"].price, d("300.5"));
    Ok(())
}

#[tokio::test]
async fn missing_files_mean_an_empty_portfolio() -> Result<()> {
    let dir = TempDir::new()?;
    let source = JsonFileSource::new(dir.path());

    let snapshot = fetch_snapshot(&source).await?;
    assert!(snapshot.is_empty());
    assert!(source.fetch_stock_detail("SBER").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn invalid_json_is_an_error_with_path() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("positions.json"), "{not json")?;

    let err = fetch_snapshot(&JsonFileSource::new(dir.path()))
        .await
        .expect_err("expected parse failure");
    assert!(format!("{err:#}").contains("positions.json"));
    Ok(())
}

#[tokio::test]
async fn stock_history_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    write_data_dir(dir.path())?;

    let detail = JsonFileSource::new(dir.path())
        .fetch_stock_detail("SBER")
        .await?
        .expect("SBER stock file");
    let history = StockHistory::new(detail);

    let newest_first: Vec<String> = history
        .sorted(&StockHistory::default_sort())
        .iter()
        .map(|p| p.date.to_string())
        .collect();
    assert_eq!(newest_first, vec!["2024-07-11", "2023-07-11", "2022-05-12"]);

    let chart: Vec<String> = history
        .chart_series()
        .iter()
        .map(|p| p.date.to_string())
        .collect();
    assert_eq!(chart, vec!["2022-05-12", "2023-07-11", "2024-07-11"]);

    let average = history.average_amount().expect("non-empty history");
    assert_eq!(average.round_dp(4), d("19.4333"));
    Ok(())
}

#[tokio::test]
async fn malformed_detail_row_is_skipped_and_the_rest_still_price() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("positions.json"),
        r#"[{"ticker":"SBER","name":"Сбербанк"},{"ticker":"GAZP","name":"Газпром"}]"#,
    )?;
    std::fs::write(
        dir.path().join("details.json"),
        r#"[{"ticker":"SBER","price":300,"quantity":10},
            {"ticker":"GAZP","price":null,"quantity":5}]"#,
    )?;

    let snapshot = fetch_snapshot(&JsonFileSource::new(dir.path())).await?;
    assert_eq!(snapshot.details.len(), 1);
    assert!(snapshot.details.contains_key("SBER"));

    let engine = PortfolioEngine::new(&snapshot, 2024);
    let totals = engine.portfolio_totals();
    assert_eq!(totals.total_value, d("3000"));
    assert_eq!(totals.position_count, 2);
    assert_eq!(totals.pending_count, 1);
    Ok(())
}
