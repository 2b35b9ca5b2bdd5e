//! Return and risk analytics.
//!
//! Turns a price series into daily percentage changes and annualized statistics.

mod returns;
mod risk;

pub use returns::{compute_daily_returns, pct_change, price_movements};
pub use risk::{summarize_daily_risk, summarize_risk, TRADING_DAYS_PER_YEAR};
