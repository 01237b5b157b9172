use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use super::{decode_details, PortfolioDataSource};
use crate::models::{Detail, Position, StockDetail};

/// Snapshot stored as JSON files.
///
/// Directory structure:
/// ```text
/// data/
///   positions.json        [Position]
///   details.json          [Detail] or { ticker: Detail }
///   stocks/
///     {TICKER}.json       StockDetail
/// ```
pub struct JsonFileSource {
    base_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn positions_file(&self) -> PathBuf {
        self.base_path.join("positions.json")
    }

    fn details_file(&self) -> PathBuf {
        self.base_path.join("details.json")
    }

    fn stock_file(&self, ticker: &str) -> Result<PathBuf> {
        let valid = !ticker.is_empty()
            && ticker
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && ticker != "."
            && ticker != "..";
        if !valid {
            anyhow::bail!("Invalid ticker for file lookup: {ticker:?}");
        }
        Ok(self.base_path.join("stocks").join(format!("{ticker}.json")))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?
        {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }
}

#[async_trait::async_trait]
impl PortfolioDataSource for JsonFileSource {
    async fn fetch_positions(&self) -> Result<Vec<Position>> {
        let path = self.positions_file();
        let positions: Option<Vec<Position>> = Self::read_json(&path).await?;
        if positions.is_none() {
            debug!(path = %path.display(), "positions file missing; empty portfolio");
        }
        Ok(positions.unwrap_or_default())
    }

    async fn fetch_details(&self, tickers: &[String]) -> Result<HashMap<String, Detail>> {
        let path = self.details_file();
        let Some(file) = Self::read_json::<Value>(&path).await? else {
            debug!(path = %path.display(), "details file missing");
            return Ok(HashMap::new());
        };
        // Either shape the backend has produced: a list or a map by ticker.
        let mut details = match file {
            Value::Array(rows) => decode_details(rows),
            Value::Object(rows) => decode_details(rows.into_iter().map(|(_, row)| row)),
            other => anyhow::bail!(
                "Failed to parse {}: expected a list or map of details, got {other}",
                path.display()
            ),
        };
        details.retain(|ticker, _| tickers.contains(ticker));
        Ok(details)
    }

    async fn fetch_stock_detail(&self, ticker: &str) -> Result<Option<StockDetail>> {
        let path = self.stock_file(ticker)?;
        Self::read_json(&path).await
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
