//! Cross-sectional momentum signal construction.
//!
//! The signal is the trailing sum of resampled returns over a fixed
//! window. The most recent `tail_trim_periods` signal rows are discarded
//! and the surviving rows are relabeled `tail_trim_periods` periods
//! forward, so a rank row labeled `t` is built from information that was
//! already stale at `t`. Rows are then ranked cross-sectionally.

use ndarray::Array2;
use ronda_core::{Panel, Result, RondaError};
use serde::{Deserialize, Serialize};

use crate::rank::rank_descending;

/// Configuration for the cross-sectional momentum signal.
///
/// The defaults reproduce the classic weekly setup: a 48-period trailing
/// window with the most recent 4 signal rows trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Number of trailing periods summed into the momentum signal
    /// (default: 48).
    pub window_periods: usize,

    /// Number of most recent signal rows discarded before ranking
    /// (default: 4).
    pub tail_trim_periods: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            window_periods: 48,
            tail_trim_periods: 4,
        }
    }
}

impl MomentumConfig {
    /// Minimum number of return rows needed to produce at least one
    /// tradable rank row (one extra row so a lagged weight can meet a
    /// later return).
    #[must_use]
    pub const fn min_history(&self) -> usize {
        self.window_periods + self.tail_trim_periods + 1
    }
}

/// Trailing rolling sum over each column of a panel.
///
/// The output has the same shape and labels. Cell `(i, j)` is the sum of
/// the `window` values ending at row `i`; it is missing when fewer than
/// `window` rows precede or any value in the window is missing.
///
/// # Errors
///
/// Returns [`RondaError::InvalidData`] when `window` is zero.
pub fn rolling_sum(panel: &Panel, window: usize) -> Result<Panel> {
    if window == 0 {
        return Err(RondaError::InvalidData("rolling window must be positive".to_string()));
    }

    let n = panel.len();
    let m = panel.width();
    let mut out = Array2::from_elem((n, m), f64::NAN);

    for j in 0..m {
        for i in (window - 1)..n {
            let mut sum = 0.0;
            let mut complete = true;
            for k in (i + 1 - window)..=i {
                let v = panel.get(k, j);
                if v.is_nan() {
                    complete = false;
                    break;
                }
                sum += v;
            }
            if complete {
                out[[i, j]] = sum;
            }
        }
    }

    Panel::new(panel.index().to_vec(), panel.columns().to_vec(), out)
}

/// Builds the cross-sectional momentum rank panel from resampled
/// returns.
///
/// The trailing `window_periods` sum is computed per column, the final
/// `tail_trim_periods` rows are dropped, and every remaining row with a
/// complete window is ranked descending (rank 1 is the strongest
/// trailing return). The row computed from returns ending at index `i`
/// is labeled `returns.index()[i + tail_trim_periods]`.
///
/// # Arguments
///
/// * `returns` - Resampled return panel
/// * `config` - Window and trim parameters
///
/// # Returns
///
/// A rank panel with `returns.len() - window - trim + 1` rows, labeled
/// from `returns.index()[window + trim - 1]` to the final return label.
///
/// # Errors
///
/// Returns [`RondaError::InsufficientHistory`] when the return panel has
/// fewer than [`MomentumConfig::min_history`] rows.
pub fn rank_signal(returns: &Panel, config: &MomentumConfig) -> Result<Panel> {
    let window = config.window_periods;
    let trim = config.tail_trim_periods;
    let required = config.min_history();

    if returns.len() < required {
        return Err(RondaError::InsufficientHistory(format!(
            "cross-sectional momentum needs at least {required} return rows \
             ({window} window + {trim} trim + 1), have {}",
            returns.len()
        )));
    }

    let summed = rolling_sum(returns, window)?;

    let first = window - 1;
    let last = returns.len() - trim;
    let n_rows = last - first;
    let m = returns.width();

    let mut values = Array2::from_elem((n_rows, m), f64::NAN);
    for (out_i, i) in (first..last).enumerate() {
        let row: Vec<f64> = summed.row(i).to_vec();
        for (j, r) in rank_descending(&row).into_iter().enumerate() {
            values[[out_i, j]] = r;
        }
    }

    let index = returns.index()[first + trim..last + trim].to_vec();
    Panel::new(index, returns.columns().to_vec(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};
    use ndarray::array;

    fn weekly_dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        (0..n).map(|i| start + Duration::weeks(i as i64)).collect()
    }

    #[test]
    fn test_default_config() {
        let config = MomentumConfig::default();
        assert_eq!(config.window_periods, 48);
        assert_eq!(config.tail_trim_periods, 4);
        assert_eq!(config.min_history(), 53);
    }

    #[test]
    fn test_rolling_sum_basic() {
        let panel = Panel::new(
            weekly_dates(4),
            vec!["A".to_string()],
            array![[1.0], [2.0], [3.0], [4.0]],
        )
        .unwrap();

        let summed = rolling_sum(&panel, 2).unwrap();
        assert!(summed.get(0, 0).is_nan());
        assert_relative_eq!(summed.get(1, 0), 3.0);
        assert_relative_eq!(summed.get(2, 0), 5.0);
        assert_relative_eq!(summed.get(3, 0), 7.0);
    }

    #[test]
    fn test_rolling_sum_nan_window() {
        let panel = Panel::new(
            weekly_dates(4),
            vec!["A".to_string()],
            array![[1.0], [f64::NAN], [3.0], [4.0]],
        )
        .unwrap();

        let summed = rolling_sum(&panel, 2).unwrap();
        // Any NaN inside the window poisons the sum.
        assert!(summed.get(1, 0).is_nan());
        assert!(summed.get(2, 0).is_nan());
        assert_relative_eq!(summed.get(3, 0), 7.0);
    }

    #[test]
    fn test_rolling_sum_window_longer_than_panel() {
        let panel =
            Panel::new(weekly_dates(2), vec!["A".to_string()], array![[1.0], [2.0]]).unwrap();
        let summed = rolling_sum(&panel, 5).unwrap();
        assert!(summed.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_sum_zero_window() {
        let panel = Panel::new(weekly_dates(1), vec!["A".to_string()], array![[1.0]]).unwrap();
        assert!(rolling_sum(&panel, 0).is_err());
    }

    #[test]
    fn test_rank_signal_labels_shift_forward() {
        let dates = weekly_dates(6);
        let returns = Panel::new(
            dates.clone(),
            vec!["A".to_string(), "B".to_string()],
            array![
                [0.01, 0.02],
                [0.01, 0.02],
                [0.01, 0.02],
                [0.04, 0.01],
                [0.04, 0.01],
                [0.04, 0.01]
            ],
        )
        .unwrap();

        let config = MomentumConfig {
            window_periods: 3,
            tail_trim_periods: 1,
        };
        let ranks = rank_signal(&returns, &config).unwrap();

        // Windows end at rows 2, 3, 4; labels are one period later.
        assert_eq!(ranks.len(), 3);
        assert_eq!(ranks.index(), &dates[3..6]);

        // Window ending at row 2: B has the larger trailing sum.
        assert_eq!(ranks.row(0).to_vec(), vec![2.0, 1.0]);
        // Windows ending at rows 3 and 4: A has taken over.
        assert_eq!(ranks.row(1).to_vec(), vec![1.0, 2.0]);
        assert_eq!(ranks.row(2).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_rank_signal_row_count_default_config() {
        // 59 weekly returns with the default 48/4 setup leave 8 rank rows.
        let n = 59;
        let dates = weekly_dates(n);
        let values = Array2::from_shape_fn((n, 1), |(i, _)| 0.001 * i as f64);
        let returns = Panel::new(dates.clone(), vec!["A".to_string()], values).unwrap();

        let ranks = rank_signal(&returns, &MomentumConfig::default()).unwrap();
        assert_eq!(ranks.len(), 8);
        assert_eq!(ranks.index(), &dates[51..59]);
    }

    #[test]
    fn test_rank_signal_insufficient_history() {
        let returns = Panel::new(
            weekly_dates(4),
            vec!["A".to_string()],
            Array2::from_elem((4, 1), 0.01),
        )
        .unwrap();

        let config = MomentumConfig {
            window_periods: 3,
            tail_trim_periods: 1,
        };
        let err = rank_signal(&returns, &config).unwrap_err();
        assert!(matches!(err, RondaError::InsufficientHistory(_)));
    }

    #[test]
    fn test_rank_signal_zero_trim_keeps_own_labels() {
        let dates = weekly_dates(4);
        let returns = Panel::new(
            dates.clone(),
            vec!["A".to_string(), "B".to_string()],
            array![[0.01, 0.02], [0.01, 0.02], [0.03, 0.01], [0.03, 0.01]],
        )
        .unwrap();

        let config = MomentumConfig {
            window_periods: 3,
            tail_trim_periods: 0,
        };
        let ranks = rank_signal(&returns, &config).unwrap();
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks.index(), &dates[2..4]);
    }

    #[test]
    fn test_rank_signal_nan_column_stays_nan() {
        let dates = weekly_dates(5);
        let returns = Panel::new(
            dates,
            vec!["A".to_string(), "B".to_string()],
            array![
                [0.01, f64::NAN],
                [0.01, 0.02],
                [0.01, 0.02],
                [0.01, 0.02],
                [0.01, 0.02]
            ],
        )
        .unwrap();

        let config = MomentumConfig {
            window_periods: 2,
            tail_trim_periods: 1,
        };
        let ranks = rank_signal(&returns, &config).unwrap();

        // First window touches B's missing return: B unranked, A ranked alone.
        assert_eq!(ranks.get(0, 0), 1.0);
        assert!(ranks.get(0, 1).is_nan());
        // Later windows are complete.
        assert_eq!(ranks.get(1, 0), 2.0);
        assert_eq!(ranks.get(1, 1), 1.0);
    }
}
