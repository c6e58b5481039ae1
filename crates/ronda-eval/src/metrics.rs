//! Performance metrics.
//!
//! The wealth curve is a non-compounding cumulative sum, the Sharpe
//! ratio subtracts a per-period risk-free rate, and the Information
//! Ratio compares the portfolio mean against a benchmark mean taken at
//! the benchmark's own observation frequency. Degenerate inputs flow
//! through IEEE arithmetic (`0/0` is `NaN`, `x/0` is infinite) rather
//! than raising errors.

use ronda_core::stats::{nan_mean, sample_std};
use ronda_core::{Panel, Result, RondaError, TimeSeries};
use ronda_signals::simple_returns;

/// Cumulative return and wealth curves of a portfolio return series.
///
/// The cumulative curve is the running sum of the per-period returns
/// (no compounding); wealth is `(cumulative + 1) * capital`.
///
/// # Errors
///
/// Only shape errors from series construction.
pub fn cumulative_wealth(port_ret: &TimeSeries, capital: f64) -> Result<(TimeSeries, TimeSeries)> {
    let mut cumulative = Vec::with_capacity(port_ret.len());
    let mut wealth = Vec::with_capacity(port_ret.len());
    let mut cum = 0.0;
    for &r in port_ret.values() {
        cum += r;
        cumulative.push(cum);
        wealth.push((cum + 1.0) * capital);
    }
    Ok((
        TimeSeries::new(port_ret.index().to_vec(), cumulative)?,
        TimeSeries::new(port_ret.index().to_vec(), wealth)?,
    ))
}

/// Annualized Sharpe ratio of a per-period return series.
///
/// `(mean - risk_free) / std * sqrt(periods_per_year)` with the sample
/// standard deviation (N-1 denominator). The risk-free rate is
/// interpreted per period. A flat series yields `NaN` or an infinity
/// through ordinary IEEE division; no guard is applied.
#[must_use]
pub fn sharpe_ratio(returns: &[f64], risk_free: f64, periods_per_year: f64) -> f64 {
    (nan_mean(returns) - risk_free) / sample_std(returns) * periods_per_year.sqrt()
}

/// Annualized Information Ratio of a portfolio against benchmark
/// returns.
///
/// `(mean(port) - mean(benchmark)) / std(port) * sqrt(periods_per_year)`.
/// The benchmark series is used exactly as given; when it was observed
/// at a different frequency than the portfolio (daily versus weekly in
/// the classic setup) the two means are on different scales. That
/// mismatch is part of the metric's definition here.
#[must_use]
pub fn information_ratio(port: &[f64], benchmark: &[f64], periods_per_year: f64) -> f64 {
    (nan_mean(port) - nan_mean(benchmark)) / sample_std(port) * periods_per_year.sqrt()
}

/// Simple returns of a single-column benchmark panel at its native
/// frequency.
///
/// No resampling is applied; missing returns are dropped from the
/// output. This feeds [`information_ratio`].
///
/// # Errors
///
/// Returns [`RondaError::InvalidData`] unless the panel has exactly one
/// column.
pub fn benchmark_returns(benchmark: &Panel) -> Result<Vec<f64>> {
    if benchmark.width() != 1 {
        return Err(RondaError::InvalidData(format!(
            "benchmark must have exactly one column, has {}",
            benchmark.width()
        )));
    }
    let returns = simple_returns(benchmark)?;
    Ok(returns
        .values()
        .column(0)
        .iter()
        .copied()
        .filter(|r| !r.is_nan())
        .collect())
}
