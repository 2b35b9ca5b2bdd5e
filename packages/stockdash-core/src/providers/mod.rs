//! External data providers.
//!
//! Each provider is a trait so the dashboard can be driven by the HTTP clients in
//! this module or by in-memory fakes. Providers only fetch and reshape data; the
//! analytics never see a provider error.

mod alpha_vantage;
mod news;
mod yahoo;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::types::{DateRange, FinancialStatement, NewsItem, PriceSeries, StatementKind};

pub use alpha_vantage::{parse_statement, AlphaVantageClient};
pub use news::{parse_feed, YahooNewsFeed};
pub use yahoo::{parse_chart, YahooPriceClient};

/// User agent sent with every provider request. Yahoo rejects the reqwest default.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Longest response excerpt kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// Errors raised while talking to a data provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("No data available for {0}")]
    NoData(String),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Alpha Vantage API key is not configured (set ALPHA_VANTAGE_API_KEY)")]
    MissingApiKey,
}

impl ProviderError {
    /// Whether the provider answered but had nothing for the request.
    pub fn is_no_data(&self) -> bool {
        matches!(self, ProviderError::NoData(_) | ProviderError::InvalidSymbol(_))
    }

    fn status(status: reqwest::StatusCode, body: &str) -> Self {
        let mut body = body.trim().to_string();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
            body.push_str("...");
        }
        ProviderError::Status {
            status: status.as_u16(),
            body,
        }
    }
}

/// Source of daily price history.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily bars for `symbol` covering `range`.
    ///
    /// Returns `ProviderError::NoData` when the provider has no bars for the request.
    async fn fetch_prices(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, ProviderError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Source of annual financial statements.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Fetch one annual statement for `symbol`.
    async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
    ) -> Result<FinancialStatement, ProviderError>;

    async fn balance_sheet(&self, symbol: &str) -> Result<FinancialStatement, ProviderError> {
        self.statement(symbol, StatementKind::BalanceSheet).await
    }

    async fn income_statement(&self, symbol: &str) -> Result<FinancialStatement, ProviderError> {
        self.statement(symbol, StatementKind::IncomeStatement).await
    }

    async fn cash_flow(&self, symbol: &str) -> Result<FinancialStatement, ProviderError> {
        self.statement(symbol, StatementKind::CashFlow).await
    }

    fn name(&self) -> &str;
}

/// Source of recent news headlines with sentiment.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch at most `limit` items, newest first as published by the feed.
    async fn latest_news(&self, symbol: &str, limit: usize)
        -> Result<Vec<NewsItem>, ProviderError>;

    fn name(&self) -> &str;
}

/// Build the HTTP client shared by the provider implementations.
pub fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Normalize a user-entered ticker.
fn normalize_symbol(symbol: &str) -> Result<String, ProviderError> {
    let symbol = symbol.trim();
    if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
        return Err(ProviderError::InvalidSymbol(symbol.to_string()));
    }
    Ok(symbol.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_symbol("brk-b").unwrap(), "BRK-B");
        assert!(matches!(
            normalize_symbol("  "),
            Err(ProviderError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize_symbol("AA PL"),
            Err(ProviderError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_status_error_truncates_body() {
        let body = "x".repeat(500);
        let err = ProviderError::status(reqwest::StatusCode::BAD_GATEWAY, &body);
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_ERROR_BODY + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_no_data() {
        assert!(ProviderError::NoData("AAPL".into()).is_no_data());
        assert!(ProviderError::InvalidSymbol(String::new()).is_no_data());
        assert!(!ProviderError::MissingApiKey.is_no_data());
    }
}
