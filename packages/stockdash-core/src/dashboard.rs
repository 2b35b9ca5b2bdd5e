//! One dashboard load: pricing, fundamentals and news for a ticker and range.
//!
//! The three sections are fetched one after another and fail independently.
//! A failed section carries the message to show in its place; it never aborts
//! the other sections.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analytics::{
    compute_daily_returns, price_movements, summarize_risk, TRADING_DAYS_PER_YEAR,
};
use crate::config::DashboardConfig;
use crate::providers::{
    AlphaVantageClient, FundamentalsProvider, NewsProvider, PriceProvider, ProviderError,
    YahooNewsFeed, YahooPriceClient,
};
use crate::types::{
    DateRange, FinancialStatement, NewsItem, PriceMovement, PriceSeries, ReturnSeries, RiskReport,
    StatementKind,
};
use crate::Result;

/// Shown when the price provider has nothing for the ticker and range.
pub const NO_DATA_MESSAGE: &str = "Invalid ticker or no data available for the given date range.";

/// The inputs of one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub symbol: String,
    pub range: DateRange,
}

impl DashboardRequest {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }

    /// Build a request from raw sidebar input.
    pub fn parse(symbol: &str, start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(symbol.trim(), DateRange::parse(start, end)?))
    }
}

/// Outcome of loading one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    /// Nothing to show, with an informational message.
    Notice(String),
    /// The provider failed; the message includes the cause.
    Failed(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    /// The notice or failure message, if the section has no data.
    pub fn message(&self) -> Option<&str> {
        match self {
            Section::Ready(_) => None,
            Section::Notice(msg) | Section::Failed(msg) => Some(msg),
        }
    }
}

/// Everything the pricing tab shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingView {
    pub series: PriceSeries,
    pub movements: Vec<PriceMovement>,
    pub returns: ReturnSeries,
    pub risk: RiskReport,
}

impl PricingView {
    /// Derive returns and risk statistics from a fetched series.
    pub fn from_series(series: PriceSeries, periods_per_year: u32) -> Self {
        let returns = compute_daily_returns(&series);
        let risk = summarize_risk(&returns, periods_per_year);
        let movements = price_movements(&series);
        Self {
            series,
            movements,
            returns,
            risk,
        }
    }
}

/// The three annual statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsView {
    pub balance_sheet: FinancialStatement,
    pub income_statement: FinancialStatement,
    pub cash_flow: FinancialStatement,
}

impl FundamentalsView {
    pub fn statement(&self, kind: StatementKind) -> &FinancialStatement {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }
}

/// Result of one dashboard load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub request: DashboardRequest,
    pub pricing: Section<PricingView>,
    pub fundamentals: Section<FundamentalsView>,
    pub news: Section<Vec<NewsItem>>,
}

/// Loads dashboard snapshots from a set of providers.
#[derive(Clone)]
pub struct Dashboard {
    prices: Arc<dyn PriceProvider>,
    fundamentals: Arc<dyn FundamentalsProvider>,
    news: Arc<dyn NewsProvider>,
    periods_per_year: u32,
    news_limit: usize,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("prices", &self.prices.name())
            .field("fundamentals", &self.fundamentals.name())
            .field("news", &self.news.name())
            .field("periods_per_year", &self.periods_per_year)
            .field("news_limit", &self.news_limit)
            .finish()
    }
}

impl Dashboard {
    pub fn new(
        prices: Arc<dyn PriceProvider>,
        fundamentals: Arc<dyn FundamentalsProvider>,
        news: Arc<dyn NewsProvider>,
    ) -> Self {
        Self {
            prices,
            fundamentals,
            news,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            news_limit: 10,
        }
    }

    /// Build the HTTP providers described by `config`.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let providers = &config.providers;
        let timeout = providers.timeout();

        let prices = YahooPriceClient::new(&providers.price_base_url, timeout)?;
        let fundamentals = AlphaVantageClient::new(
            &providers.fundamentals_base_url,
            providers.alpha_vantage_api_key.clone(),
            timeout,
        )?;
        let news = YahooNewsFeed::new(&providers.news_base_url, timeout)?;

        if !fundamentals.has_api_key() {
            tracing::warn!("no Alpha Vantage API key configured, fundamentals will be unavailable");
        }

        Ok(Self::new(Arc::new(prices), Arc::new(fundamentals), Arc::new(news))
            .with_periods_per_year(config.analytics.periods_per_year)
            .with_news_limit(config.news.limit))
    }

    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    pub fn with_news_limit(mut self, limit: usize) -> Self {
        self.news_limit = limit;
        self
    }

    pub fn news_limit(&self) -> usize {
        self.news_limit
    }

    /// Load all three sections in order.
    pub async fn load(&self, request: &DashboardRequest) -> DashboardSnapshot {
        tracing::info!(
            symbol = %request.symbol,
            start = %request.range.start,
            end = %request.range.end,
            "loading dashboard"
        );

        let pricing = self.load_pricing(&request.symbol, request.range).await;
        let fundamentals = self.load_fundamentals(&request.symbol).await;
        let news = self.load_news(&request.symbol).await;

        DashboardSnapshot {
            request: request.clone(),
            pricing,
            fundamentals,
            news,
        }
    }

    /// Fetch prices and derive the return statistics.
    pub async fn load_pricing(&self, symbol: &str, range: DateRange) -> Section<PricingView> {
        match self.prices.fetch_prices(symbol, range).await {
            Ok(series) if series.is_empty() => Section::Notice(NO_DATA_MESSAGE.to_string()),
            Ok(series) => Section::Ready(PricingView::from_series(series, self.periods_per_year)),
            Err(e) if e.is_no_data() => {
                tracing::info!(symbol, error = %e, "no price data");
                Section::Notice(NO_DATA_MESSAGE.to_string())
            }
            Err(e) => {
                tracing::warn!(
                    symbol,
                    provider = self.prices.name(),
                    error = %e,
                    "price fetch failed"
                );
                Section::Failed(format!("An error occurred while fetching stock data: {}", e))
            }
        }
    }

    /// Fetch the balance sheet, income statement and cash flow statement.
    pub async fn load_fundamentals(&self, symbol: &str) -> Section<FundamentalsView> {
        match self.fetch_fundamentals(symbol).await {
            Ok(view) => Section::Ready(view),
            Err(e) => {
                tracing::warn!(
                    symbol,
                    provider = self.fundamentals.name(),
                    error = %e,
                    "fundamentals fetch failed"
                );
                Section::Failed(format!(
                    "An error occurred while fetching fundamental data: {}",
                    e
                ))
            }
        }
    }

    async fn fetch_fundamentals(
        &self,
        symbol: &str,
    ) -> std::result::Result<FundamentalsView, ProviderError> {
        Ok(FundamentalsView {
            balance_sheet: self.fundamentals.balance_sheet(symbol).await?,
            income_statement: self.fundamentals.income_statement(symbol).await?,
            cash_flow: self.fundamentals.cash_flow(symbol).await?,
        })
    }

    /// Fetch the latest headlines with their sentiment.
    pub async fn load_news(&self, symbol: &str) -> Section<Vec<NewsItem>> {
        match self.news.latest_news(symbol, self.news_limit).await {
            Ok(items) => Section::Ready(items),
            Err(e) => {
                tracing::warn!(
                    symbol,
                    provider = self.news.name(),
                    error = %e,
                    "news fetch failed"
                );
                Section::Failed(format!("An error occurred while fetching news: {}", e))
            }
        }
    }
}
