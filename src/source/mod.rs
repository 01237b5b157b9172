//! Where snapshots come from.
//!
//! A [`PortfolioDataSource`] hands out positions, details keyed by ticker
//! and single-stock records. [`fetch_snapshot`] stitches the first two into
//! the [`PortfolioSnapshot`] the engine consumes.

mod json_file;
mod memory;
mod slot;

#[cfg(feature = "http")]
mod http;

pub use json_file::JsonFileSource;
pub use memory::MemorySource;
pub use slot::{SnapshotSlot, SnapshotTicket};

#[cfg(feature = "http")]
pub use http::HttpSource;

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Detail, Position, StockDetail};
use crate::portfolio::PortfolioSnapshot;

#[async_trait::async_trait]
pub trait PortfolioDataSource: Send + Sync {
    async fn fetch_positions(&self) -> Result<Vec<Position>>;

    /// Details for `tickers`, keyed by ticker. Tickers the source knows
    /// nothing about are simply absent.
    async fn fetch_details(&self, tickers: &[String]) -> Result<HashMap<String, Detail>>;

    /// `Ok(None)` when the source has no record for `ticker`.
    async fn fetch_stock_detail(&self, ticker: &str) -> Result<Option<StockDetail>>;

    fn name(&self) -> &str;
}

/// Fetch positions, then the details of exactly those tickers.
pub async fn fetch_snapshot(source: &dyn PortfolioDataSource) -> Result<PortfolioSnapshot> {
    let positions = source
        .fetch_positions()
        .await
        .with_context(|| format!("Failed to fetch positions from {}", source.name()))?;
    if positions.is_empty() {
        debug!(source = source.name(), "no positions; skipping detail fetch");
        return Ok(PortfolioSnapshot::default());
    }

    let tickers: Vec<String> = positions.iter().map(|p| p.ticker.clone()).collect();
    let details = source
        .fetch_details(&tickers)
        .await
        .with_context(|| format!("Failed to fetch details from {}", source.name()))?;
    debug!(
        source = source.name(),
        positions = positions.len(),
        details = details.len(),
        "fetched snapshot"
    );
    Ok(PortfolioSnapshot::new(positions, details))
}

/// Decode detail rows one by one and key them by ticker.
///
/// A row that does not decode is logged and skipped; the rest still load.
/// A later entry for the same ticker wins.
pub(crate) fn decode_details(rows: impl IntoIterator<Item = Value>) -> HashMap<String, Detail> {
    let mut details = HashMap::new();
    for row in rows {
        let ticker = row
            .get("ticker")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();
        match serde_json::from_value::<Detail>(row) {
            Ok(detail) => {
                details.insert(detail.ticker.clone(), detail);
            }
            Err(err) => warn!(ticker = %ticker, error = %err, "skipping malformed detail"),
        }
    }
    details
}
