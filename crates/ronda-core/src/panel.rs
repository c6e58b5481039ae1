//! Labeled numeric tables used throughout the backtesting pipeline.
//!
//! A single generic [`Panel`] type carries every stage of the pipeline:
//! prices, returns, rolling signals, ranks and weights are all panels
//! with a date index, named security columns and a dense `f64` matrix
//! where `NaN` encodes a missing observation.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{Result, RondaError};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
///
/// Symbols identify securities across the Ronda crates. Typically these
/// are ticker symbols like "GE" or "IBM".
pub type Symbol = String;

/// A labeled numeric table: date index, security columns and a dense
/// `f64` matrix with `NaN` for missing observations.
///
/// The same type serves prices, returns, signals, ranks and weights;
/// only the interpretation of the cells changes from stage to stage.
/// Rows are assumed to be in ascending date order.
///
/// # Example
///
/// ```
/// use ronda_core::Panel;
/// use chrono::NaiveDate;
/// use ndarray::array;
///
/// let index = vec![
///     NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 1, 12).unwrap(),
/// ];
/// let columns = vec!["GE".to_string(), "IBM".to_string()];
/// let values = array![[100.0, 130.0], [101.0, 129.5]];
///
/// let panel = Panel::new(index, columns, values).unwrap();
/// assert_eq!(panel.len(), 2);
/// assert_eq!(panel.width(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Panel {
    index: Vec<Date>,
    columns: Vec<Symbol>,
    values: Array2<f64>,
}

impl Panel {
    /// Creates a new `Panel` from an index, column names and a value
    /// matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] when the matrix shape does not
    /// match the index and column lengths.
    pub fn new(index: Vec<Date>, columns: Vec<Symbol>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != index.len() {
            return Err(RondaError::InvalidData(format!(
                "panel has {} rows but {} index labels",
                values.nrows(),
                index.len()
            )));
        }
        if values.ncols() != columns.len() {
            return Err(RondaError::InvalidData(format!(
                "panel has {} columns but {} column names",
                values.ncols(),
                columns.len()
            )));
        }
        Ok(Self { index, columns, values })
    }

    /// The date index, one label per row.
    #[must_use]
    pub fn index(&self) -> &[Date] {
        &self.index
    }

    /// The column names, one per security.
    #[must_use]
    pub fn columns(&self) -> &[Symbol] {
        &self.columns
    }

    /// The underlying value matrix (rows x columns).
    #[must_use]
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the panel has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a row by date label.
    #[must_use]
    pub fn label_position(&self, date: Date) -> Option<usize> {
        self.index.iter().position(|d| *d == date)
    }

    /// A single row as a view.
    #[must_use]
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.values.row(i)
    }

    /// Cell value at (row, column).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }

    /// Drops every column that contains at least one missing value.
    ///
    /// This mirrors the universe cleanup applied to downloaded price
    /// panels: a security with any gap in its history is removed rather
    /// than patched.
    #[must_use]
    pub fn drop_incomplete_columns(&self) -> Self {
        let keep: Vec<usize> = (0..self.width())
            .filter(|&j| self.values.column(j).iter().all(|v| !v.is_nan()))
            .collect();

        let mut values = Array2::from_elem((self.len(), keep.len()), f64::NAN);
        let mut columns = Vec::with_capacity(keep.len());
        for (out_j, &j) in keep.iter().enumerate() {
            columns.push(self.columns[j].clone());
            for i in 0..self.len() {
                values[[i, out_j]] = self.values[[i, j]];
            }
        }
        Self {
            index: self.index.clone(),
            columns,
            values,
        }
    }
}

/// A labeled series of `f64` values, used for portfolio returns and
/// wealth curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    index: Vec<Date>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` from an index and values.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] when the lengths differ.
    pub fn new(index: Vec<Date>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(RondaError::InvalidData(format!(
                "series has {} values but {} index labels",
                values.len(),
                index.len()
            )));
        }
        Ok(Self { index, values })
    }

    /// The date index.
    #[must_use]
    pub fn index(&self) -> &[Date] {
        &self.index
    }

    /// The values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_panel_new_validates_shape() {
        let index = vec![date(2020, 1, 5)];
        let columns = vec!["GE".to_string()];
        let values = array![[1.0], [2.0]];
        assert!(Panel::new(index, columns, values).is_err());

        let index = vec![date(2020, 1, 5)];
        let columns = vec!["GE".to_string(), "IBM".to_string()];
        let values = array![[1.0]];
        assert!(Panel::new(index, columns, values).is_err());
    }

    #[test]
    fn test_panel_accessors() {
        let panel = Panel::new(
            vec![date(2020, 1, 5), date(2020, 1, 12)],
            vec!["GE".to_string(), "IBM".to_string()],
            array![[100.0, 130.0], [101.0, 129.5]],
        )
        .unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.width(), 2);
        assert!(panel.has_column("IBM"));
        assert!(!panel.has_column("GOOG"));
        assert_eq!(panel.column_position("IBM"), Some(1));
        assert_eq!(panel.label_position(date(2020, 1, 12)), Some(1));
        assert_eq!(panel.label_position(date(2020, 1, 19)), None);
        assert_eq!(panel.get(1, 0), 101.0);
    }

    #[test]
    fn test_drop_incomplete_columns() {
        let panel = Panel::new(
            vec![date(2020, 1, 5), date(2020, 1, 12)],
            vec!["GE".to_string(), "IBM".to_string(), "GOOG".to_string()],
            array![[100.0, f64::NAN, 50.0], [101.0, 129.5, 51.0]],
        )
        .unwrap();

        let complete = panel.drop_incomplete_columns();
        assert_eq!(complete.columns(), &["GE".to_string(), "GOOG".to_string()]);
        assert_eq!(complete.len(), 2);
        assert_eq!(complete.get(0, 1), 50.0);
    }

    #[test]
    fn test_drop_incomplete_columns_all_complete() {
        let panel = Panel::new(
            vec![date(2020, 1, 5)],
            vec!["GE".to_string()],
            array![[100.0]],
        )
        .unwrap();
        assert_eq!(panel.drop_incomplete_columns().width(), 1);
    }

    #[test]
    fn test_time_series_basics() {
        let ts = TimeSeries::new(vec![date(2020, 1, 5), date(2020, 1, 12)], vec![0.01, -0.02])
            .unwrap();
        assert_eq!(ts.len(), 2);
        assert!(!ts.is_empty());
        assert_eq!(ts.last(), Some(-0.02));

        assert!(TimeSeries::new(vec![date(2020, 1, 5)], vec![1.0, 2.0]).is_err());
    }
}
