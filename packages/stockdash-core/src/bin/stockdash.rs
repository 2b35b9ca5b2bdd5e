//! Stockdash CLI - command line access to the dashboard data.
//!
//! Every command prints pretty JSON wrapped in `{ ok, data, error }`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use stockdash_core::{
    config::API_KEY_ENV,
    providers::{AlphaVantageClient, FundamentalsProvider, NewsProvider, YahooNewsFeed},
    ApiResponse, Dashboard, DashboardConfig, DashboardRequest, PricingView, Section,
    StatementKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(about = "Stock prices, return statistics, fundamentals and news")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $STOCKDASH_CONFIG or the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct Window {
    /// Ticker symbol
    #[arg(short, long)]
    symbol: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// End date (YYYY-MM-DD), exclusive
    #[arg(long)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily price history with percentage changes
    Prices {
        #[command(flatten)]
        window: Window,
    },
    /// Annualized return, volatility and risk-adjusted return
    Risk {
        #[command(flatten)]
        window: Window,
        /// Annualization factor (overrides the config)
        #[arg(short, long)]
        periods: Option<u32>,
    },
    /// Annual financial statements
    Fundamentals {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: Option<String>,
        /// Only fetch one statement
        #[arg(long, value_enum)]
        statement: Option<StatementArg>,
    },
    /// Latest headlines with sentiment scores
    News {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: Option<String>,
        /// Number of headlines (overrides the config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Load every dashboard section
    Dashboard {
        #[command(flatten)]
        window: Window,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatementArg {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl From<StatementArg> for StatementKind {
    fn from(arg: StatementArg) -> Self {
        match arg {
            StatementArg::BalanceSheet => StatementKind::BalanceSheet,
            StatementArg::IncomeStatement => StatementKind::IncomeStatement,
            StatementArg::CashFlow => StatementKind::CashFlow,
        }
    }
}

#[tokio::main]
async fn main() {
    // stdout carries the JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(DashboardConfig::default_path);
    let config = match DashboardConfig::load_path(&config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", render(&ApiResponse::<()>::err(e.to_string())));
            std::process::exit(1);
        }
    };

    let output = match cli.command {
        Commands::Prices { window } => handle_prices(&config, window).await,
        Commands::Risk { window, periods } => handle_risk(&config, window, periods).await,
        Commands::Fundamentals { symbol, statement } => {
            handle_fundamentals(&config, symbol, statement).await
        }
        Commands::News { symbol, limit } => handle_news(&config, symbol, limit).await,
        Commands::Dashboard { window } => handle_dashboard(&config, window).await,
        Commands::Config => handle_config(&config, &config_path),
    };

    println!("{}", output);
}

fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| json!({ "ok": false, "error": e.to_string() }).to_string())
}

fn error(message: impl Into<String>) -> String {
    render(&ApiResponse::<()>::err(message))
}

fn request(config: &DashboardConfig, window: Window) -> stockdash_core::Result<DashboardRequest> {
    let defaults = &config.defaults;
    DashboardRequest::parse(
        window.symbol.as_deref().unwrap_or(&defaults.ticker),
        window.start.as_deref().unwrap_or(&defaults.start_date),
        window.end.as_deref().unwrap_or(&defaults.end_date),
    )
}

fn dashboard(config: &DashboardConfig) -> Result<Dashboard, String> {
    Dashboard::from_config(config).map_err(|e| e.to_string())
}

/// Load the pricing section, or the message that replaces it.
async fn pricing(config: &DashboardConfig, window: Window) -> Result<PricingView, String> {
    let request = request(config, window).map_err(|e| e.to_string())?;
    match dashboard(config)?
        .load_pricing(&request.symbol, request.range)
        .await
    {
        Section::Ready(view) => Ok(view),
        Section::Notice(msg) | Section::Failed(msg) => Err(msg),
    }
}

async fn handle_prices(config: &DashboardConfig, window: Window) -> String {
    match pricing(config, window).await {
        Ok(view) => render(&ApiResponse::ok(json!({
            "symbol": view.series.symbol(),
            "bars": view.series.bars(),
            "movements": view.movements,
        }))),
        Err(msg) => error(msg),
    }
}

async fn handle_risk(config: &DashboardConfig, window: Window, periods: Option<u32>) -> String {
    let mut config = config.clone();
    if let Some(periods) = periods {
        if periods == 0 {
            return error("periods must be positive");
        }
        config.analytics.periods_per_year = periods;
    }

    match pricing(&config, window).await {
        Ok(view) => render(&ApiResponse::ok(json!({
            "symbol": view.series.symbol(),
            "first_date": view.series.first_date(),
            "last_date": view.series.last_date(),
            "risk": view.risk,
        }))),
        Err(msg) => error(msg),
    }
}

async fn handle_fundamentals(
    config: &DashboardConfig,
    symbol: Option<String>,
    statement: Option<StatementArg>,
) -> String {
    let symbol = symbol.unwrap_or_else(|| config.defaults.ticker.clone());

    match statement {
        Some(kind) => {
            let client = match AlphaVantageClient::new(
                &config.providers.fundamentals_base_url,
                config.providers.alpha_vantage_api_key.clone(),
                config.providers.timeout(),
            ) {
                Ok(client) => client,
                Err(e) => return error(e.to_string()),
            };
            match client.statement(&symbol, kind.into()).await {
                Ok(statement) => render(&ApiResponse::ok(statement)),
                Err(e) => error(format!(
                    "An error occurred while fetching fundamental data: {}",
                    e
                )),
            }
        }
        None => {
            let dashboard = match dashboard(config) {
                Ok(d) => d,
                Err(e) => return error(e),
            };
            match dashboard.load_fundamentals(&symbol).await {
                Section::Ready(view) => render(&ApiResponse::ok(view)),
                Section::Notice(msg) | Section::Failed(msg) => error(msg),
            }
        }
    }
}

async fn handle_news(
    config: &DashboardConfig,
    symbol: Option<String>,
    limit: Option<usize>,
) -> String {
    let symbol = symbol.unwrap_or_else(|| config.defaults.ticker.clone());
    let limit = limit.unwrap_or(config.news.limit);

    let feed = match YahooNewsFeed::new(
        &config.providers.news_base_url,
        config.providers.timeout(),
    ) {
        Ok(feed) => feed,
        Err(e) => return error(e.to_string()),
    };

    match feed.latest_news(&symbol, limit).await {
        Ok(items) => render(&ApiResponse::ok(json!({
            "symbol": symbol.trim().to_uppercase(),
            "count": items.len(),
            "items": items,
        }))),
        Err(e) => error(format!("An error occurred while fetching news: {}", e)),
    }
}

async fn handle_dashboard(config: &DashboardConfig, window: Window) -> String {
    let request = match request(config, window) {
        Ok(request) => request,
        Err(e) => return error(e.to_string()),
    };
    match dashboard(config) {
        Ok(dashboard) => render(&ApiResponse::ok(dashboard.load(&request).await)),
        Err(e) => error(e),
    }
}

fn handle_config(config: &DashboardConfig, path: &std::path::Path) -> String {
    let mut shown = config.clone();
    let has_key = shown.providers.alpha_vantage_api_key.take().is_some();
    render(&ApiResponse::ok(json!({
        "path": path.display().to_string(),
        "exists": path.exists(),
        "api_key_configured": has_key,
        "api_key_env": API_KEY_ENV,
        "config": shown,
    })))
}
