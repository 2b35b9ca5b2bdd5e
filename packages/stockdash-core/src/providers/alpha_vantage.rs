//! Alpha Vantage fundamentals client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Map, Value};

use super::{http_client, normalize_symbol, FundamentalsProvider, ProviderError};
use crate::types::{FinancialStatement, StatementKind, StatementRow};

/// Keys that describe a report rather than being line items.
const PERIOD_KEY: &str = "fiscalDateEnding";
const CURRENCY_KEY: &str = "reportedCurrency";

/// Keys Alpha Vantage uses to report failures with a 200 status.
const ERROR_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Alpha Vantage client for annual statements.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl AlphaVantageClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co";

    /// Create a client. Without an API key every request fails with
    /// `ProviderError::MissingApiKey`.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self::with_client(base_url, api_key, http_client(timeout)?))
    }

    pub fn with_client(base_url: &str, api_key: Option<String>, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_url(
        &self,
        symbol: &str,
        kind: StatementKind,
        api_key: &str,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}/query", self.base_url))
            .map_err(|e| ProviderError::Url(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("function", function_name(kind))
            .append_pair("symbol", symbol)
            .append_pair("apikey", api_key);
        Ok(url)
    }
}

fn function_name(kind: StatementKind) -> &'static str {
    match kind {
        StatementKind::BalanceSheet => "BALANCE_SHEET",
        StatementKind::IncomeStatement => "INCOME_STATEMENT",
        StatementKind::CashFlow => "CASH_FLOW",
    }
}

#[async_trait]
impl FundamentalsProvider for AlphaVantageClient {
    async fn statement(
        &self,
        symbol: &str,
        kind: StatementKind,
    ) -> Result<FinancialStatement, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let symbol = normalize_symbol(symbol)?;
        let url = self.build_url(&symbol, kind, api_key)?;
        // The key travels in the query string, so only log the function
        tracing::debug!(symbol = %symbol, function = function_name(kind), "requesting statement");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::status(status, &body));
        }

        parse_statement(&symbol, kind, &body)
    }

    fn name(&self) -> &str {
        "alpha_vantage"
    }
}

/// Parse a statement response and transpose its annual reports.
///
/// Each report becomes a column headed by its fiscal period end. Every other
/// key becomes a row, in the order it first appears, with the currency row
/// left out. Values reported as `"None"` become empty cells.
pub fn parse_statement(
    symbol: &str,
    kind: StatementKind,
    body: &str,
) -> Result<FinancialStatement, ProviderError> {
    let root: Value = serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    let object = root
        .as_object()
        .ok_or_else(|| ProviderError::Parse("expected a JSON object".to_string()))?;

    for key in ERROR_KEYS {
        if let Some(message) = object.get(key) {
            let message = message.as_str().map_or_else(|| message.to_string(), str::to_string);
            return Err(ProviderError::Api(message));
        }
    }

    let reports: Vec<&Map<String, Value>> = match object.get("annualReports") {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(_) => {
            return Err(ProviderError::Parse(
                "annualReports is not an array".to_string(),
            ))
        }
        None => Vec::new(),
    };

    if reports.is_empty() {
        return Err(ProviderError::NoData(symbol.to_string()));
    }

    let periods: Vec<String> = reports
        .iter()
        .map(|report| {
            report
                .get(PERIOD_KEY)
                .and_then(cell)
                .unwrap_or_default()
        })
        .collect();

    let mut labels: Vec<&str> = Vec::new();
    for report in &reports {
        for key in report.keys() {
            if key != PERIOD_KEY && key != CURRENCY_KEY && !labels.contains(&key.as_str()) {
                labels.push(key.as_str());
            }
        }
    }

    let rows = labels
        .into_iter()
        .map(|label| StatementRow {
            label: label.to_string(),
            values: reports
                .iter()
                .map(|report| report.get(label).and_then(cell))
                .collect(),
        })
        .collect();

    Ok(FinancialStatement {
        kind,
        symbol: symbol.to_string(),
        periods,
        rows,
    })
}

fn cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() || s == "None" => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
