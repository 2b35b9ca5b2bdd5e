//! Stockdash Core - data and analytics behind the stock dashboard.
//!
//! This crate provides everything the dashboard needs below the presentation layer:
//!
//! - **Return/risk statistics**: daily percentage changes, annualized return,
//!   annualized volatility and a risk-adjusted ratio
//! - **Providers**: price history, annual financial statements and news headlines
//! - **Sentiment**: compound scores for news titles and summaries
//! - **Dashboard loading**: one request, three independently failing sections
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stockdash_core::analytics::{compute_daily_returns, summarize_daily_risk};
//! use stockdash_core::PriceSeries;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let series = PriceSeries::from_closes("AAPL", vec![
//!     (day(2), 100.0),
//!     (day(3), 90.0),
//!     (day(4), 99.0),
//! ])
//! .unwrap();
//!
//! let returns = compute_daily_returns(&series);
//! assert_eq!(returns.len(), 2);
//!
//! let report = summarize_daily_risk(&returns);
//! assert!(report.summary().is_some());
//! ```

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod providers;
pub mod sentiment;
pub mod types;

// Re-export commonly used types
pub use types::{
    ApiResponse, DailyReturn, DateRange, FinancialStatement, NewsItem, PriceBar, PriceMovement,
    PriceSeries, ReturnSeries, RiskRatio, RiskReport, RiskSummary, StatementKind, StatementRow,
};

// Re-export main functionality
pub use analytics::{
    compute_daily_returns, price_movements, summarize_daily_risk, summarize_risk,
    TRADING_DAYS_PER_YEAR,
};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardRequest, DashboardSnapshot, PricingView, Section};
pub use providers::ProviderError;

/// Error types for stockdash-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for stockdash-core operations.
pub type Result<T> = std::result::Result<T, Error>;
