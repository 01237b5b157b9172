//! In-memory data source for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;

use super::PortfolioDataSource;
use crate::models::{Detail, Position, StockDetail};

#[derive(Default)]
pub struct MemorySource {
    positions: Vec<Position>,
    details: HashMap<String, Detail>,
    stocks: HashMap<String, StockDetail>,
    detail_requests: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.details.insert(detail.ticker.clone(), detail);
        self
    }

    pub fn with_stock(mut self, stock: StockDetail) -> Self {
        self.stocks.insert(stock.ticker.clone(), stock);
        self
    }

    /// Number of `fetch_details` calls served so far.
    pub fn detail_requests(&self) -> usize {
        self.detail_requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PortfolioDataSource for MemorySource {
    async fn fetch_positions(&self) -> Result<Vec<Position>> {
        Ok(self.positions.clone())
    }

    async fn fetch_details(&self, tickers: &[String]) -> Result<HashMap<String, Detail>> {
        self.detail_requests.fetch_add(1, Ordering::SeqCst);
        Ok(tickers
            .iter()
            .filter_map(|ticker| self.details.get(ticker).cloned())
            .map(|detail| (detail.ticker.clone(), detail))
            .collect())
    }

    async fn fetch_stock_detail(&self, ticker: &str) -> Result<Option<StockDetail>> {
        Ok(self.stocks.get(ticker).cloned())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
