//! Statistical utility functions shared across the backtesting pipeline.
//!
//! The helpers here mirror the conventions of the surrounding pipeline:
//! `NaN` marks a missing observation and is skipped when computing
//! moments, while degenerate inputs produce `NaN` results instead of
//! errors.

/// Mean of the finite values in `values`, skipping `NaN` and infinities.
///
/// # Arguments
///
/// * `values` - The input values
///
/// # Returns
///
/// The arithmetic mean of the finite entries, or `NaN` when there are
/// none.
///
/// # Examples
///
/// ```
/// use ronda_core::stats::nan_mean;
///
/// let mean = nan_mean(&[1.0, 2.0, f64::NAN, 4.0, 5.0]);
/// assert!((mean - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn nan_mean(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in values {
        if v.is_finite() {
            sum += v;
            n += 1;
        }
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Sample standard deviation (N-1 denominator) of the finite values.
///
/// Mirrors the behaviour of `Series.std()` in dataframe libraries:
/// `NaN` entries are skipped, fewer than two finite values yield `NaN`,
/// and a constant input yields exactly `0.0`. No lower threshold is
/// applied, so callers relying on IEEE division semantics (for example
/// the Sharpe ratio on a flat return series) see `NaN` or infinities
/// rather than an error.
///
/// # Arguments
///
/// * `values` - The input values
///
/// # Examples
///
/// ```
/// use ronda_core::stats::sample_std;
///
/// let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((std - 2.5_f64.sqrt()).abs() < 1e-12);
/// assert_eq!(sample_std(&[2.0, 2.0, 2.0]), 0.0);
/// ```
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

/// Maximum peak-to-trough decline of a wealth curve, as a fraction.
///
/// Returns `NaN` for an empty curve and `0.0` when the curve never
/// declines. Peaks at or below zero are ignored.
#[must_use]
pub fn max_drawdown(wealth: &[f64]) -> f64 {
    let Some(&first) = wealth.first() else {
        return f64::NAN;
    };
    let mut peak = first;
    let mut worst = 0.0_f64;
    for &value in &wealth[1..] {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            worst = worst.max((peak - value) / peak);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nan_mean_basic() {
        assert_relative_eq!(nan_mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn test_nan_mean_skips_nan() {
        assert_relative_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0);
    }

    #[test]
    fn test_nan_mean_empty() {
        assert!(nan_mean(&[]).is_nan());
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn test_sample_std_known_value() {
        // Variance of 1..5 is 2.5 with the N-1 denominator.
        assert_relative_eq!(sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.5_f64.sqrt());
    }

    #[test]
    fn test_sample_std_constant_is_zero() {
        assert_eq!(sample_std(&[7.0, 7.0, 7.0, 7.0]), 0.0);
    }

    #[test]
    fn test_sample_std_short_input() {
        assert!(sample_std(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
    }

    #[test]
    fn test_sample_std_skips_nan() {
        let with_nan = sample_std(&[1.0, f64::NAN, 2.0, 3.0]);
        let without = sample_std(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(with_nan, without);
    }

    #[test]
    fn test_max_drawdown_basic() {
        // Peak 110, trough 88: drawdown 20%.
        let wealth = [100.0, 110.0, 99.0, 88.0, 120.0];
        assert_relative_eq!(max_drawdown(&wealth), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_max_drawdown_monotone_rise() {
        assert_eq!(max_drawdown(&[100.0, 101.0, 102.0]), 0.0);
    }

    #[test]
    fn test_max_drawdown_empty() {
        assert!(max_drawdown(&[]).is_nan());
        assert_eq!(max_drawdown(&[100.0]), 0.0);
    }
}
