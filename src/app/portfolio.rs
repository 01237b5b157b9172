use anyhow::{Context, Result};
use tracing::{info, warn};

use super::types::{
    CalendarEventOutput, CalendarOutput, ChangeOutput, ChartPointOutput, DiagnosticOutput,
    PaymentOutput, PositionDividendsOutput, PositionOutput, PositionsOutput, StockOutput,
    SummaryOutput, YearDividendsOutput,
};
use crate::config::{DisplayConfig, ResolvedConfig, SourceKind};
use crate::dividends::{CalendarMonth, DividendPayment};
use crate::format::{format_amount, format_change, format_currency, format_percent};
use crate::models::{InstrumentType, StockDetail};
use crate::portfolio::{EnrichedPosition, PortfolioEngine, PortfolioSnapshot};
use crate::session::{SessionGate, SessionState, TokenStore};
use crate::sort::SortSpec;
use crate::source::{fetch_snapshot, JsonFileSource, PortfolioDataSource, SnapshotSlot};
use crate::stock::StockHistory;
use crate::view::{ChangeView, ViewProjection};

/// Check the session (when the source has one) and fetch a snapshot into
/// `slot`. Returns the snapshot the slot holds afterwards.
pub async fn load_snapshot(
    source: &dyn PortfolioDataSource,
    tokens: Option<&dyn TokenStore>,
    slot: &SnapshotSlot,
) -> Result<PortfolioSnapshot> {
    if let Some(tokens) = tokens {
        let mut gate = SessionGate::new();
        let state = gate
            .check(tokens)
            .await
            .context("Failed to look up brokerage token")?;
        if state == SessionState::Prompting {
            warn!("no brokerage token stored; run `divbook token --set <TOKEN>`");
        }
        gate.ensure_can_fetch()?;
    }

    let ticket = slot.ticket();
    let snapshot = fetch_snapshot(source).await?;
    if !slot.install(ticket, snapshot) {
        info!(ticket = ticket.value(), "newer snapshot already installed");
    }
    let current = slot
        .current()
        .context("No snapshot installed after fetch")?;
    Ok(PortfolioSnapshot::clone(&current))
}

/// Build the engine from the configured source.
pub async fn load_engine(config: &ResolvedConfig, reference_year: i32) -> Result<PortfolioEngine> {
    let slot = SnapshotSlot::new();
    let snapshot = match config.source {
        SourceKind::File => {
            let source = JsonFileSource::new(&config.data_dir);
            load_snapshot(&source, None, &slot).await?
        }
        SourceKind::Http => load_http_snapshot(config, &slot).await?,
    };
    Ok(PortfolioEngine::new(&snapshot, reference_year))
}

/// Load the stock details record for `ticker` from the configured source.
pub async fn load_stock(config: &ResolvedConfig, ticker: &str) -> Result<StockHistory> {
    let detail = match config.source {
        SourceKind::File => {
            JsonFileSource::new(&config.data_dir)
                .fetch_stock_detail(ticker)
                .await?
        }
        SourceKind::Http => load_http_stock(config, ticker).await?,
    };
    let detail = detail.with_context(|| format!("No stock details for {ticker}"))?;
    Ok(StockHistory::new(detail))
}

#[cfg(feature = "http")]
async fn load_http_snapshot(
    config: &ResolvedConfig,
    slot: &SnapshotSlot,
) -> Result<PortfolioSnapshot> {
    let source = crate::source::HttpSource::new(config.base_url.clone());
    load_snapshot(&source, Some(&source), slot).await
}

#[cfg(feature = "http")]
async fn load_http_stock(config: &ResolvedConfig, ticker: &str) -> Result<Option<StockDetail>> {
    crate::source::HttpSource::new(config.base_url.clone())
        .fetch_stock_detail(ticker)
        .await
}

#[cfg(not(feature = "http"))]
async fn load_http_snapshot(
    _config: &ResolvedConfig,
    _slot: &SnapshotSlot,
) -> Result<PortfolioSnapshot> {
    anyhow::bail!("HTTP source requested but divbook was built without the `http` feature")
}

#[cfg(not(feature = "http"))]
async fn load_http_stock(_config: &ResolvedConfig, _ticker: &str) -> Result<Option<StockDetail>> {
    anyhow::bail!("HTTP source requested but divbook was built without the `http` feature")
}

fn change_output(view: ChangeView, display: &DisplayConfig) -> ChangeOutput {
    ChangeOutput {
        mode: view.mode.as_str().to_string(),
        caption: view.mode.caption_ru().to_string(),
        change: view.change.to_string(),
        change_percent: view.change_percent.to_string(),
        change_display: format_change(view.change, display),
        change_percent_display: format_percent(view.change_percent),
    }
}

fn payment_output(payment: &DividendPayment) -> PaymentOutput {
    PaymentOutput {
        date: payment.date.to_string(),
        amount: payment.amount_per_share.to_string(),
        dividend_yield_percent: payment.dividend_yield_percent.map(format_percent),
        last_buy_date: payment.last_buy_date.map(|d| d.to_string()),
    }
}

pub fn summary_output(
    engine: &PortfolioEngine,
    view: &ViewProjection,
    display: &DisplayConfig,
) -> SummaryOutput {
    let totals = engine.portfolio_totals();
    SummaryOutput {
        total_value: totals.total_value.to_string(),
        total_value_display: format_currency(totals.total_value, display),
        change: change_output(engine.change_view(view), display),
        dividends_year: totals.dividends_year,
        total_dividends: totals.total_dividends.to_string(),
        total_dividends_display: format_currency(totals.total_dividends, display),
        position_count: totals.position_count,
        pending_count: totals.pending_count,
        diagnostics: engine
            .diagnostics()
            .iter()
            .map(DiagnosticOutput::from)
            .collect(),
    }
}

fn position_output(
    position: &EnrichedPosition,
    view: &ViewProjection,
    display: &DisplayConfig,
) -> PositionOutput {
    let detail = position.detail.as_ref();
    PositionOutput {
        ticker: position.position.ticker.clone(),
        name: position.position.name.clone(),
        instrument_type: position.position.instrument_type.as_str().to_string(),
        image_url: position.position.image_url.clone(),
        loaded: !position.is_pending(),
        price: detail.map(|d| d.price.to_string()),
        quantity: detail.map(|d| d.quantity),
        total_value: position.total_value.map(|v| v.to_string()),
        total_value_display: position.total_value.map(|v| format_currency(v, display)),
        change: view
            .position_change(position)
            .map(|change| change_output(change, display)),
        dividend_yield_percent: detail
            .and_then(|d| d.dividend_yield_percent)
            .map(format_percent),
        total_dividends: position.total_dividends_this_year.map(|v| v.to_string()),
        total_dividends_display: position
            .total_dividends_this_year
            .map(|v| format_currency(v, display)),
        dividends_this_year: position.dividends_this_year.iter().map(payment_output).collect(),
    }
}

pub fn positions_output(
    engine: &PortfolioEngine,
    spec: &SortSpec,
    instrument_types: &[InstrumentType],
    view: &ViewProjection,
    display: &DisplayConfig,
) -> PositionsOutput {
    PositionsOutput {
        sort: spec.key.clone(),
        direction: spec.direction.to_string(),
        positions: engine
            .table_positions(spec, instrument_types)
            .iter()
            .map(|p| position_output(p, view, display))
            .collect(),
    }
}

pub fn calendar_output(
    engine: &PortfolioEngine,
    month: CalendarMonth,
    spec: &SortSpec,
    display: &DisplayConfig,
) -> CalendarOutput {
    let bucket = engine.sorted_month_dividends(month, spec);
    CalendarOutput {
        month: bucket.month.index(),
        month_name: bucket.month.name_ru().to_string(),
        total: bucket.total.to_string(),
        total_display: format_currency(bucket.total, display),
        events: bucket
            .events
            .iter()
            .map(|event| CalendarEventOutput {
                title: event.title.clone(),
                ticker: event.ticker.clone(),
                image_url: event.image_url.clone(),
                date: event.date.to_string(),
                quantity: event.quantity,
                amount_per_share: event.amount_per_share.to_string(),
                amount_total: event.amount_total.to_string(),
                amount_total_display: format_currency(event.amount_total, display),
                dividend_yield_percent: event.dividend_yield_percent.map(format_percent),
            })
            .collect(),
    }
}

pub fn dividends_output(
    engine: &PortfolioEngine,
    year: i32,
    display: &DisplayConfig,
) -> YearDividendsOutput {
    let dividends = engine.dividends_for_year(year);
    YearDividendsOutput {
        year: dividends.year,
        total: dividends.total.to_string(),
        total_display: format_currency(dividends.total, display),
        by_position: dividends
            .by_position
            .iter()
            .map(|entry| PositionDividendsOutput {
                ticker: entry.ticker.clone(),
                total: entry.total.map(|t| t.to_string()),
                payment_count: entry.payment_count,
            })
            .collect(),
    }
}

pub fn stock_output(
    history: &StockHistory,
    spec: &SortSpec,
    display: &DisplayConfig,
) -> StockOutput {
    let detail = history.detail();
    StockOutput {
        ticker: detail.ticker.clone(),
        name: detail.name.clone(),
        sector: detail.sector.as_ref().map(|s| s.title.clone()),
        country_of_risk: detail.country_of_risk.clone(),
        current_price: detail.current_price.to_string(),
        current_price_display: format_currency(detail.current_price, display),
        quantity: detail.quantity,
        holding_value_display: history.holding_value().map(|v| format_currency(v, display)),
        average_amount: history.average_amount().map(|v| format_amount(v, 4)),
        history: history.sorted(spec).iter().map(payment_output).collect(),
        chart: history
            .chart_series()
            .iter()
            .map(|point| ChartPointOutput {
                date: point.date.to_string(),
                amount: point.amount.to_string(),
            })
            .collect(),
        diagnostics: history
            .diagnostics()
            .iter()
            .map(DiagnosticOutput::from)
            .collect(),
    }
}
