//! Cross-sectional ranking.
//!
//! Ranks are 1-based and descending: the largest value in a row receives
//! rank 1. Tied values share the average of the ranks they span, and
//! missing values stay missing without affecting the ranks of the rest.

use ndarray::Array2;
use ronda_core::{Panel, Result};

/// Ranks a slice in descending order (largest value gets rank 1).
///
/// Ties receive the average of the ranks they cover, matching the usual
/// dense statistical convention. `NaN` entries are excluded from the
/// ranking and stay `NaN` in the output.
///
/// # Example
///
/// ```
/// use ronda_signals::rank::rank_descending;
///
/// let ranks = rank_descending(&[0.3, 0.1, 0.2]);
/// assert_eq!(ranks, vec![1.0, 3.0, 2.0]);
///
/// let tied = rank_descending(&[0.2, 0.2, 0.1]);
/// assert_eq!(tied, vec![1.5, 1.5, 3.0]);
/// ```
#[must_use]
pub fn rank_descending(values: &[f64]) -> Vec<f64> {
    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![f64::NAN; values.len()];
    let n = indexed.len();
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }
        // 1-based positions i+1 ..= j share their average rank.
        let avg = (i + j + 1) as f64 / 2.0;
        for k in i..j {
            ranks[indexed[k].0] = avg;
        }
        i = j;
    }

    ranks
}

/// Ranks every row of a panel in descending order.
///
/// The output panel has the same shape and labels; each row holds the
/// [`rank_descending`] of the corresponding input row.
///
/// # Errors
///
/// Only shape errors from panel construction.
pub fn rank_rows_descending(panel: &Panel) -> Result<Panel> {
    let mut values = Array2::from_elem((panel.len(), panel.width()), f64::NAN);
    for i in 0..panel.len() {
        let row: Vec<f64> = panel.row(i).to_vec();
        for (j, r) in rank_descending(&row).into_iter().enumerate() {
            values[[i, j]] = r;
        }
    }
    Panel::new(panel.index().to_vec(), panel.columns().to_vec(), values)
}
