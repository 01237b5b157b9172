//! REST backend of the brokerage bridge.

use std::collections::HashMap;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{decode_details, PortfolioDataSource};
use crate::models::{Detail, Position, StockDetail};
use crate::session::{TokenLookup, TokenStore};

const TOKEN_NOT_FOUND: &str = "Token not found";

/// Body of `GET /api/get_token`, both on success and on 404.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Serialize)]
struct SetTokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Override API base URL (useful for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl PortfolioDataSource for HttpSource {
    async fn fetch_positions(&self) -> Result<Vec<Position>> {
        let url = self.url("/api/portfolio");
        debug!(url = %url, "fetching positions");
        let positions = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()?
            .json::<Vec<Position>>()
            .await
            .context("Failed to parse positions response")?;
        Ok(positions)
    }

    async fn fetch_details(&self, tickers: &[String]) -> Result<HashMap<String, Detail>> {
        if tickers.is_empty() {
            return Ok(HashMap::new());
        }
        let url = self.url("/api/positions");
        debug!(url = %url, tickers = tickers.len(), "fetching details");
        let rows = self
            .client
            .get(&url)
            .query(&[("tickers", tickers.join(","))])
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()?
            .json::<Vec<serde_json::Value>>()
            .await
            .context("Failed to parse details response")?;
        Ok(decode_details(rows))
    }

    async fn fetch_stock_detail(&self, ticker: &str) -> Result<Option<StockDetail>> {
        let url = self.url("/api/stock_details");
        let response = self
            .client
            .get(&url)
            .query(&[("ticker", ticker)])
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(ticker = %ticker, "stock not found");
            return Ok(None);
        }
        let stock = response
            .error_for_status()?
            .json::<StockDetail>()
            .await
            .with_context(|| format!("Failed to parse stock details for {ticker}"))?;
        Ok(Some(stock))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[async_trait::async_trait]
impl TokenStore for HttpSource {
    async fn get_token(&self) -> Result<TokenLookup> {
        let url = self.url("/api/get_token");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            warn!(status = %status, "token lookup failed");
            anyhow::bail!("Token lookup failed with status {status}");
        }

        let body: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;
        if body.message.as_deref() == Some(TOKEN_NOT_FOUND) {
            return Ok(TokenLookup::Missing);
        }
        match body.token {
            Some(token) if !token.is_empty() => Ok(TokenLookup::Found(SecretString::from(token))),
            _ => Ok(TokenLookup::Missing),
        }
    }

    async fn set_token(&self, token: SecretString) -> Result<()> {
        let url = self.url("/api/set_token");
        self.client
            .post(&url)
            .json(&SetTokenRequest {
                token: token.expose_secret(),
            })
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?
            .error_for_status()?;
        Ok(())
    }
}
