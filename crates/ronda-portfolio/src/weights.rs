//! Rank-to-weight conversion.
//!
//! Weights are demeaned ranks scaled by the security count. With rank 1
//! marking the strongest trailing return, the strongest performer ends up
//! with the most negative weight; the portfolio is short recent winners
//! and long recent losers, and complete rows are dollar neutral.

use ndarray::Array2;
use ronda_core::stats::nan_mean;
use ronda_core::{Panel, Result, RondaError};

/// Converts a rank panel into dollar-neutral portfolio weights.
///
/// Per row: `weight = (rank - mean(rank)) / n_securities`, where the
/// mean skips missing ranks but the denominator is always the full
/// column count. Missing ranks produce missing weights; rows of complete
/// ranks sum to zero.
///
/// # Errors
///
/// Returns [`RondaError::InvalidData`] when the panel has no columns.
pub fn ranks_to_weights(ranks: &Panel) -> Result<Panel> {
    let m = ranks.width();
    if m == 0 {
        return Err(RondaError::InvalidData(
            "weight computation needs at least one security column".to_string(),
        ));
    }

    let n = ranks.len();
    let mut values = Array2::from_elem((n, m), f64::NAN);
    for i in 0..n {
        let row: Vec<f64> = ranks.row(i).to_vec();
        let mean = nan_mean(&row);
        for (j, rank) in row.iter().enumerate() {
            values[[i, j]] = (rank - mean) / m as f64;
        }
    }

    Panel::new(ranks.index().to_vec(), ranks.columns().to_vec(), values)
}

/// Mean one-period weight turnover across consecutive rows.
///
/// For each pair of consecutive rows the absolute weight changes are
/// summed over the columns where both weights are finite; the result is
/// the mean of those sums. Returns `NaN` when no pair has a comparable
/// column.
#[must_use]
pub fn weight_turnover(weights: &Panel) -> f64 {
    let mut changes = Vec::new();
    for i in 1..weights.len() {
        let mut sum = 0.0;
        let mut comparable = false;
        for j in 0..weights.width() {
            let prev = weights.get(i - 1, j);
            let cur = weights.get(i, j);
            if prev.is_finite() && cur.is_finite() {
                sum += (cur - prev).abs();
                comparable = true;
            }
        }
        if comparable {
            changes.push(sum);
        }
    }
    if changes.is_empty() {
        return f64::NAN;
    }
    changes.iter().sum::<f64>() / changes.len() as f64
}
