//! Core data types for the stock dashboard.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One trading day of price history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    /// Trading date (exchange local)
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Closing price adjusted for splits and dividends
    pub adj_close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Create a bar where every price field equals `price`.
    pub fn from_close(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            open: price,
            high: price,
            low: price,
            close: price,
            adj_close: price,
            volume: 0,
        }
    }
}

/// Daily price history of one symbol, ascending by date with unique dates.
///
/// The adjusted close is the canonical price used by the analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, checking ordering and price invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSeries` if dates are not strictly ascending or an
    /// adjusted close is negative or not finite.
    pub fn new(symbol: &str, bars: Vec<PriceBar>) -> Result<Self> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(Error::InvalidSeries(format!(
                    "dates must be strictly ascending ({} followed by {})",
                    pair[0].date, pair[1].date
                )));
            }
        }

        if let Some(bad) = bars
            .iter()
            .find(|b| !b.adj_close.is_finite() || b.adj_close < 0.0)
        {
            return Err(Error::InvalidSeries(format!(
                "adjusted close on {} is {}",
                bad.date, bad.adj_close
            )));
        }

        Ok(Self {
            symbol: symbol.to_uppercase(),
            bars,
        })
    }

    /// Build a series from (date, adjusted close) pairs.
    pub fn from_closes(symbol: &str, closes: Vec<(NaiveDate, f64)>) -> Result<Self> {
        let bars = closes
            .into_iter()
            .map(|(date, price)| PriceBar::from_close(date, price))
            .collect();
        Self::new(symbol, bars)
    }

    /// Ticker symbol (uppercase).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Adjusted closing prices in date order.
    pub fn adj_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adj_close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

/// Percentage change between two consecutive prices, dated at the later one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyReturn {
    pub date: NaiveDate,
    /// Fractional change (0.01 for 1%)
    pub value: f64,
}

/// Ordered daily returns derived from a [`PriceSeries`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReturnSeries {
    returns: Vec<DailyReturn>,
}

impl ReturnSeries {
    pub(crate) fn new(returns: Vec<DailyReturn>) -> Self {
        Self { returns }
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn as_slice(&self) -> &[DailyReturn] {
        &self.returns
    }

    /// Iterate over the fractional return values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.returns.iter().map(|r| r.value)
    }
}

/// Return per unit of volatility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RiskRatio {
    Defined(f64),
    /// Volatility is zero, so the ratio has no meaning.
    Undefined,
}

impl RiskRatio {
    pub fn value(&self) -> Option<f64> {
        match self {
            RiskRatio::Defined(v) => Some(*v),
            RiskRatio::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RiskRatio::Defined(_))
    }
}

impl fmt::Display for RiskRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskRatio::Defined(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            RiskRatio::Undefined => write!(f, "undefined"),
        }
    }
}

/// Annualized return statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskSummary {
    /// Mean daily return scaled to a year, in percent
    pub annualized_return: f64,
    /// Population standard deviation scaled to a year, in percent
    pub annualized_stdev: f64,
    /// `annualized_return / annualized_stdev`
    pub risk_adjusted_return: RiskRatio,
    /// Number of returns the statistics were computed from
    pub observations: usize,
    /// Annualization factor used
    pub periods_per_year: u32,
}

/// Outcome of summarizing a return series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskReport {
    /// No returns to summarize.
    InsufficientData,
    Summary(RiskSummary),
}

impl RiskReport {
    pub fn summary(&self) -> Option<&RiskSummary> {
        match self {
            RiskReport::Summary(s) => Some(s),
            RiskReport::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, RiskReport::InsufficientData)
    }
}

/// A row of the price movement table: a bar and its change from the prior day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceMovement {
    #[serde(flatten)]
    pub bar: PriceBar,
    /// Fractional change of the adjusted close
    pub pct_change: f64,
}

/// Requested date window, start inclusive and end exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDate` if `start` is not before `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidDate(format!(
                "start date {} must be before end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// First date to request from the price provider.
    ///
    /// One day before `start`, so the first requested day has a prior price.
    pub fn fetch_start(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.start)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{}: {}", value.trim(), e)))
}

/// Annual financial statement families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::IncomeStatement => "Income Statement",
            StatementKind::CashFlow => "Cash Flow Statement",
        }
    }

    pub fn all() -> [StatementKind; 3] {
        [
            StatementKind::BalanceSheet,
            StatementKind::IncomeStatement,
            StatementKind::CashFlow,
        ]
    }
}

/// One line item of a statement, one cell per reporting period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementRow {
    pub label: String,
    /// Raw reported values; `None` where the provider reported nothing
    pub values: Vec<Option<String>>,
}

/// A financial statement laid out with line items as rows and periods as columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialStatement {
    pub kind: StatementKind,
    pub symbol: String,
    /// Fiscal period end dates, newest first as reported
    pub periods: Vec<String>,
    pub rows: Vec<StatementRow>,
}

impl FinancialStatement {
    pub fn row(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Numeric value of a line item for a period.
    pub fn value(&self, label: &str, period: &str) -> Option<f64> {
        let column = self.periods.iter().position(|p| p == period)?;
        self.row(label)?
            .values
            .get(column)?
            .as_deref()?
            .parse()
            .ok()
    }
}

/// A news headline with precomputed sentiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    /// Publish time as reported by the feed
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub title: String,
    pub summary: String,
    /// Compound sentiment of the title, -1.0 to 1.0
    pub title_sentiment: f64,
    /// Compound sentiment of the summary, -1.0 to 1.0
    pub summary_sentiment: f64,
}

/// API response wrapper used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_price_series_new() {
        let series =
            PriceSeries::from_closes("aapl", vec![(day(2), 100.0), (day(3), 101.0)]).unwrap();
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.len(), 2);
        assert_eq!(series.adj_closes(), vec![100.0, 101.0]);
        assert_eq!(series.first_date(), Some(day(2)));
        assert_eq!(series.last_date(), Some(day(3)));
    }

    #[test]
    fn test_price_series_rejects_unsorted_dates() {
        let result = PriceSeries::from_closes("AAPL", vec![(day(3), 100.0), (day(2), 101.0)]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn test_price_series_rejects_duplicate_dates() {
        let result = PriceSeries::from_closes("AAPL", vec![(day(2), 100.0), (day(2), 101.0)]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn test_price_series_rejects_negative_price() {
        let result = PriceSeries::from_closes("AAPL", vec![(day(2), 100.0), (day(3), -1.0)]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));

        let result = PriceSeries::from_closes("AAPL", vec![(day(2), f64::NAN)]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn test_price_series_allows_zero_and_empty() {
        assert!(PriceSeries::from_closes("AAPL", vec![(day(2), 0.0)]).is_ok());
        assert!(PriceSeries::new("AAPL", Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::parse("2020-01-01", "2023-01-01").unwrap();
        assert_eq!(range.fetch_start(), NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());

        assert!(matches!(
            DateRange::parse("2023-01-01", "2020-01-01"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("2023-01-01", "2023-01-01"),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("2023-13-01", "2024-01-01"),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_risk_ratio_display() {
        assert_eq!(RiskRatio::Undefined.to_string(), "undefined");
        assert_eq!(format!("{:.2}", RiskRatio::Defined(1.23456)), "1.23");
        assert_eq!(RiskRatio::Defined(0.5).value(), Some(0.5));
        assert!(!RiskRatio::Undefined.is_defined());
    }

    #[test]
    fn test_risk_report_serialization() {
        let json = serde_json::to_value(RiskReport::InsufficientData).unwrap();
        assert_eq!(json["status"], "insufficient_data");

        let ratio = serde_json::to_value(RiskRatio::Undefined).unwrap();
        assert_eq!(ratio["status"], "undefined");
    }

    #[test]
    fn test_statement_value() {
        let statement = FinancialStatement {
            kind: StatementKind::BalanceSheet,
            symbol: "IBM".to_string(),
            periods: vec!["2023-12-31".to_string(), "2022-12-31".to_string()],
            rows: vec![StatementRow {
                label: "totalAssets".to_string(),
                values: vec![Some("135241000000".to_string()), None],
            }],
        };

        assert_eq!(statement.value("totalAssets", "2023-12-31"), Some(135241000000.0));
        assert_eq!(statement.value("totalAssets", "2022-12-31"), None);
        assert_eq!(statement.value("goodwill", "2023-12-31"), None);
        assert_eq!(StatementKind::CashFlow.title(), "Cash Flow Statement");
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
