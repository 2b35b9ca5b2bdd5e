//! Dashboard configuration.
//!
//! Loaded from a TOML file. Every section and key is optional; anything left
//! out keeps its default. The Alpha Vantage key should normally come from the
//! `ALPHA_VANTAGE_API_KEY` environment variable rather than the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::TRADING_DAYS_PER_YEAR;
use crate::providers::{AlphaVantageClient, YahooNewsFeed, YahooPriceClient};
use crate::types::{parse_date, DateRange};
use crate::{Error, Result};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "STOCKDASH_CONFIG";

/// Environment variable holding the Alpha Vantage API key.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub defaults: DefaultsConfig,
    pub analytics: AnalyticsConfig,
    pub news: NewsConfig,
    pub providers: ProvidersConfig,
}

/// Initial sidebar inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            start_date: "2020-01-01".to_string(),
            end_date: "2023-01-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annualization factor for return statistics
    pub periods_per_year: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewsConfig {
    /// Number of headlines to show
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Provider endpoints and credentials.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProvidersConfig {
    pub price_base_url: String,
    pub fundamentals_base_url: String,
    pub news_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_vantage_api_key: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            price_base_url: YahooPriceClient::DEFAULT_BASE_URL.to_string(),
            fundamentals_base_url: AlphaVantageClient::DEFAULT_BASE_URL.to_string(),
            news_base_url: YahooNewsFeed::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            alpha_vantage_api_key: None,
        }
    }
}

// Keep the key out of logs and debug dumps
impl std::fmt::Debug for ProvidersConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvidersConfig")
            .field("price_base_url", &self.price_base_url)
            .field("fundamentals_base_url", &self.fundamentals_base_url)
            .field("news_base_url", &self.news_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "alpha_vantage_api_key",
                &self.alpha_vantage_api_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DashboardConfig {
    /// Get the default config file path.
    ///
    /// Default path: `<config dir>/stockdash/config.toml`
    /// Can be overridden with `STOCKDASH_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("stockdash/config.toml"))
            .unwrap_or_else(|| PathBuf::from("stockdash.toml"))
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path(&Self::default_path())?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a specific file, applying environment overrides.
    pub fn load_path(path: &Path) -> Result<Self> {
        let mut config = Self::load_from_path(path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_api_key(env::var(API_KEY_ENV).ok());
    }

    fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.providers.alpha_vantage_api_key = Some(key);
        }
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.analytics.periods_per_year == 0 {
            return Err(Error::Config(
                "analytics.periods_per_year must be positive".to_string(),
            ));
        }
        if self.news.limit == 0 {
            return Err(Error::Config("news.limit must be positive".to_string()));
        }
        if self.providers.timeout_secs == 0 {
            return Err(Error::Config(
                "providers.timeout_secs must be positive".to_string(),
            ));
        }
        if self.defaults.ticker.trim().is_empty() {
            return Err(Error::Config("defaults.ticker must not be empty".to_string()));
        }
        self.default_range()?;
        Ok(())
    }

    /// The default date window.
    pub fn default_range(&self) -> Result<DateRange> {
        let start: NaiveDate = parse_date(&self.defaults.start_date)?;
        let end: NaiveDate = parse_date(&self.defaults.end_date)?;
        DateRange::new(start, end)
    }
}
