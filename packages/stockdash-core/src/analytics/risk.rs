//! Annualized return and volatility statistics.

use crate::types::{ReturnSeries, RiskRatio, RiskReport, RiskSummary};

/// Trading days in a year, the default annualization factor.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Annualized volatility (in percent) at or below which the risk-adjusted
/// ratio is reported as undefined. Absorbs rounding noise in returns that
/// are equal in exact arithmetic.
const ZERO_VOLATILITY: f64 = 1e-9;

/// Summarize a return series into annualized statistics.
///
/// # Arguments
///
/// * `returns` - Daily returns (e.g., 0.01 for a 1% daily gain)
/// * `periods_per_year` - Annualization factor (252 for daily trading data)
///
/// # Returns
///
/// `RiskReport::InsufficientData` for an empty series. Otherwise a summary with:
///
/// - `annualized_return = mean * periods_per_year * 100`
/// - `annualized_stdev = population_stdev * sqrt(periods_per_year) * 100`
/// - `risk_adjusted_return = annualized_return / annualized_stdev`, or
///   `RiskRatio::Undefined` when the volatility is zero
pub fn summarize_risk(returns: &ReturnSeries, periods_per_year: u32) -> RiskReport {
    if returns.is_empty() {
        return RiskReport::InsufficientData;
    }

    let n = returns.len() as f64;
    let periods = f64::from(periods_per_year);

    // Mean return
    let mean = returns.values().sum::<f64>() / n;

    // Population standard deviation
    let variance = returns.values().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let annualized_return = mean * periods * 100.0;
    let annualized_stdev = std * periods.sqrt() * 100.0;

    let risk_adjusted_return = if annualized_stdev > ZERO_VOLATILITY {
        RiskRatio::Defined(annualized_return / annualized_stdev)
    } else {
        RiskRatio::Undefined
    };

    RiskReport::Summary(RiskSummary {
        annualized_return,
        annualized_stdev,
        risk_adjusted_return,
        observations: returns.len(),
        periods_per_year,
    })
}

/// Summarize daily returns with the 252 trading day convention.
pub fn summarize_daily_risk(returns: &ReturnSeries) -> RiskReport {
    summarize_risk(returns, TRADING_DAYS_PER_YEAR)
}
