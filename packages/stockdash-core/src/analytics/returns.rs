//! Daily percentage changes of a price series.

use crate::types::{DailyReturn, PriceMovement, PriceSeries, ReturnSeries};

/// Fractional change from `prev` to `current`.
///
/// Returns `None` unless both prices are positive and finite.
pub fn pct_change(prev: f64, current: f64) -> Option<f64> {
    if prev > 0.0 && current > 0.0 && prev.is_finite() && current.is_finite() {
        Some(current / prev - 1.0)
    } else {
        None
    }
}

/// Compute daily returns from adjusted closing prices.
///
/// `return[i-1] = price[i] / price[i-1] - 1` for each consecutive pair. The first
/// price has no prior day and produces no return, so a positive series of length
/// N yields N-1 returns. Pairs involving a zero price are omitted. Series shorter
/// than two prices give an empty result.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use stockdash_core::{compute_daily_returns, PriceSeries};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let series = PriceSeries::from_closes("X", vec![(day(2), 100.0), (day(3), 110.0)]).unwrap();
///
/// let returns = compute_daily_returns(&series);
/// assert_eq!(returns.len(), 1);
/// assert!((returns.as_slice()[0].value - 0.10).abs() < 1e-12);
/// ```
pub fn compute_daily_returns(prices: &PriceSeries) -> ReturnSeries {
    let returns = prices
        .bars()
        .windows(2)
        .filter_map(|w| {
            pct_change(w[0].adj_close, w[1].adj_close).map(|value| DailyReturn {
                date: w[1].date,
                value,
            })
        })
        .collect();

    ReturnSeries::new(returns)
}

/// Build the price movement table: every bar that has a defined change from
/// the previous day, together with that change.
pub fn price_movements(prices: &PriceSeries) -> Vec<PriceMovement> {
    prices
        .bars()
        .windows(2)
        .filter_map(|w| {
            pct_change(w[0].adj_close, w[1].adj_close).map(|pct_change| PriceMovement {
                bar: w[1].clone(),
                pct_change,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let closes = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (start + chrono::Days::new(i as u64), p))
            .collect();
        PriceSeries::from_closes("TEST", closes).unwrap()
    }

    #[test]
    fn test_daily_returns_length_and_values() {
        let prices = [100.0, 110.0, 99.0, 120.0, 118.5];
        let returns = compute_daily_returns(&series(&prices));

        assert_eq!(returns.len(), prices.len() - 1);
        for (i, r) in returns.as_slice().iter().enumerate() {
            assert_abs_diff_eq!(r.value, prices[i + 1] / prices[i] - 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_daily_returns_dated_at_later_price() {
        let returns = compute_daily_returns(&series(&[100.0, 110.0, 121.0]));
        let dates: Vec<_> = returns.as_slice().iter().map(|r| r.date).collect();

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn test_daily_returns_short_series() {
        assert!(compute_daily_returns(&series(&[])).is_empty());
        assert!(compute_daily_returns(&series(&[100.0])).is_empty());
    }

    #[test]
    fn test_daily_returns_skip_zero_price() {
        // 100 -> 0 and 0 -> 50 are both undefined
        let returns = compute_daily_returns(&series(&[100.0, 0.0, 50.0, 55.0]));

        assert_eq!(returns.len(), 1);
        assert_abs_diff_eq!(returns.as_slice()[0].value, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(0.0, 10.0), None);
        assert_eq!(pct_change(10.0, 0.0), None);
        assert_eq!(pct_change(f64::INFINITY, 10.0), None);
        assert_abs_diff_eq!(pct_change(50.0, 25.0).unwrap(), -0.5);
    }

    #[test]
    fn test_price_movements_match_returns() {
        let prices = series(&[100.0, 90.0, 99.0]);
        let movements = price_movements(&prices);
        let returns = compute_daily_returns(&prices);

        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].bar.adj_close, 90.0);
        for (m, r) in movements.iter().zip(returns.as_slice()) {
            assert_eq!(m.bar.date, r.date);
            assert_eq!(m.pct_change, r.value);
        }
    }
}
