//! Yahoo Finance chart API client for daily price history.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{http_client, normalize_symbol, PriceProvider, ProviderError};
use crate::types::{DateRange, PriceBar, PriceSeries};

/// Yahoo Finance response structures
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance chart client
#[derive(Debug, Clone)]
pub struct YahooPriceClient {
    base_url: String,
    client: Client,
}

impl YahooPriceClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/v8/finance/chart";

    /// Create a client for the given chart endpoint.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self::with_client(base_url, http_client(timeout)?))
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL. The window starts one day before `range.start`
    /// and `range.end` is exclusive.
    fn build_url(&self, symbol: &str, range: DateRange) -> Result<Url, ProviderError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ProviderError::Url(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::Url(format!("{} cannot be a base", self.base_url)))?
            .push(symbol);

        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(range.fetch_start()).to_string())
            .append_pair("period2", &unix_midnight(range.end).to_string())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true")
            .append_pair("events", "div,splits");

        Ok(url)
    }
}

#[async_trait]
impl PriceProvider for YahooPriceClient {
    async fn fetch_prices(
        &self,
        symbol: &str,
        range: DateRange,
    ) -> Result<PriceSeries, ProviderError> {
        let symbol = normalize_symbol(symbol)?;
        let url = self.build_url(&symbol, range)?;
        tracing::debug!(symbol = %symbol, url = %url, "requesting price history");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match parse_chart(&symbol, &body) {
            Ok(series) => {
                tracing::debug!(symbol = %symbol, bars = series.len(), "price history received");
                Ok(series)
            }
            // An unparseable error page says more through its status than its body
            Err(ProviderError::Parse(_)) if !status.is_success() => {
                Err(ProviderError::status(status, &body))
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Parse a chart API response body into a price series.
///
/// Bars without a close are skipped, a missing adjusted close falls back to the
/// close, and when two bars share a date the later one wins.
pub fn parse_chart(symbol: &str, body: &str) -> Result<PriceSeries, ProviderError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(ProviderError::NoData(symbol.to_string()));
        }
        return Err(ProviderError::Api(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;

    let offset = data.meta.gmtoffset;
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adj_close = data
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut bars: Vec<PriceBar> = data
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = value_at(&quote.close, i)?;
            let date = DateTime::from_timestamp(ts.checked_add(offset)?, 0)?.date_naive();
            Some(PriceBar {
                date,
                open: value_at(&quote.open, i).unwrap_or(close),
                high: value_at(&quote.high, i).unwrap_or(close),
                low: value_at(&quote.low, i).unwrap_or(close),
                close,
                adj_close: value_at(&adj_close, i).unwrap_or(close),
                volume: value_at(&quote.volume, i).map_or(0, |v| v.max(0.0) as u64),
            })
        })
        .collect();

    // Stable sort, then keep the last bar of each date
    bars.sort_by_key(|b| b.date);
    let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match deduped.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => deduped.push(bar),
        }
    }

    if deduped.is_empty() {
        return Err(ProviderError::NoData(symbol.to_string()));
    }

    PriceSeries::new(symbol, deduped).map_err(|e| ProviderError::Parse(e.to_string()))
}

fn value_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
