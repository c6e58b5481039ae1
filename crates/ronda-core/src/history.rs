//! Long-format market data as delivered by data providers.
//!
//! A [`PriceHistory`] wraps a Polars DataFrame with one row per
//! (symbol, date) observation. The backtesting pipeline itself works on
//! wide [`Panel`]s, so the main job of this type is the pivot in
//! [`PriceHistory::to_panel`].

use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;
use polars::prelude::*;

use crate::panel::{Date, Panel, Symbol};
use crate::{Result, RondaError};

/// Column holding the security identifier.
pub const SYMBOL_COL: &str = "symbol";
/// Column holding the observation date as a `%Y-%m-%d` string.
pub const DATE_COL: &str = "date";
/// Column holding the (possibly adjusted) closing price.
pub const CLOSE_COL: &str = "close";

/// Date format used in market data frames.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `%Y-%m-%d` date string.
///
/// # Errors
///
/// Returns [`RondaError::InvalidDate`] when the string does not match the
/// format.
pub fn parse_date(s: &str) -> Result<Date> {
    Date::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| RondaError::InvalidDate(format!("{s}: {e}")))
}

/// Container for long-format price observations.
///
/// `PriceHistory` wraps a Polars DataFrame with `symbol`, `date` and
/// `close` columns, one row per observation. Dates are `%Y-%m-%d`
/// strings, so lexical order equals chronological order.
///
/// # Example
///
/// ```no_run
/// use ronda_core::PriceHistory;
/// use polars::prelude::*;
///
/// let df = df! {
///     "symbol" => &["GE", "IBM"],
///     "date" => &["2020-01-06", "2020-01-06"],
///     "close" => &[11.8, 134.2],
/// }.unwrap();
///
/// let history = PriceHistory::new(df);
/// let panel = history.to_panel().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PriceHistory {
    /// The underlying DataFrame of observations.
    data: DataFrame,
}

impl PriceHistory {
    /// Creates a new `PriceHistory` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The distinct symbols present, sorted alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error when the symbol column is missing or has an
    /// unexpected type.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        if self.data.column(SYMBOL_COL).is_err() {
            return Err(RondaError::MissingColumn(SYMBOL_COL.to_string()));
        }
        let symbols = self.data.column(SYMBOL_COL)?.as_materialized_series().str()?;
        let mut unique: Vec<Symbol> = symbols
            .unique()?
            .into_iter()
            .filter_map(|s: Option<&str>| s.map(|s| s.to_string()))
            .collect();
        unique.sort();
        Ok(unique)
    }

    /// Pivots the long-format observations into a wide [`Panel`].
    ///
    /// The panel index is the sorted union of all observation dates;
    /// columns are the sorted symbols. Cells without an observation are
    /// `NaN`, so securities listed over different ranges simply carry
    /// missing values outside their history.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::MissingColumn`] when a required column is
    /// absent and [`RondaError::InvalidDate`] when a date string cannot
    /// be parsed.
    pub fn to_panel(&self) -> Result<Panel> {
        for col in [SYMBOL_COL, DATE_COL, CLOSE_COL] {
            if self.data.column(col).is_err() {
                return Err(RondaError::MissingColumn(col.to_string()));
            }
        }

        let symbols = self.symbols()?;

        let mut all_dates: BTreeSet<Date> = BTreeSet::new();
        let mut observed: Vec<Vec<(Date, f64)>> = Vec::with_capacity(symbols.len());

        for symbol in &symbols {
            let mask = self
                .data
                .column(SYMBOL_COL)?
                .as_materialized_series()
                .str()?
                .equal(symbol.as_str());

            let rows = self.data.filter(&mask)?;
            let sorted = rows.sort([DATE_COL], Default::default())?;

            let dates = sorted.column(DATE_COL)?.as_materialized_series().str()?;
            let closes = sorted.column(CLOSE_COL)?.as_materialized_series().f64()?;

            let mut obs = Vec::with_capacity(sorted.height());
            for (date, close) in dates.into_iter().zip(closes.into_iter()) {
                let Some(date) = date else { continue };
                let date = parse_date(date)?;
                all_dates.insert(date);
                obs.push((date, close.unwrap_or(f64::NAN)));
            }
            observed.push(obs);
        }

        let index: Vec<Date> = all_dates.into_iter().collect();
        let positions: HashMap<Date, usize> =
            index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut values = Array2::from_elem((index.len(), symbols.len()), f64::NAN);
        for (j, obs) in observed.iter().enumerate() {
            for &(date, close) in obs {
                if let Some(&i) = positions.get(&date) {
                    values[[i, j]] = close;
                }
            }
        }

        Panel::new(index, symbols, values)
    }
}

impl From<DataFrame> for PriceHistory {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for PriceHistory {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df! {
            "symbol" => &["IBM", "GE", "GE", "IBM", "GE"],
            "date" => &["2020-01-06", "2020-01-06", "2020-01-07", "2020-01-07", "2020-01-08"],
            "close" => &[134.2, 11.8, 11.9, 134.9, 12.0],
        }
        .unwrap()
    }

    #[test]
    fn test_symbols_sorted_unique() {
        let history = PriceHistory::new(sample_frame());
        assert_eq!(history.symbols().unwrap(), vec!["GE".to_string(), "IBM".to_string()]);
    }

    #[test]
    fn test_to_panel_shapes_and_values() {
        let history = PriceHistory::new(sample_frame());
        let panel = history.to_panel().unwrap();

        assert_eq!(panel.len(), 3);
        assert_eq!(panel.columns(), &["GE".to_string(), "IBM".to_string()]);

        // GE is fully observed.
        assert_eq!(panel.get(0, 0), 11.8);
        assert_eq!(panel.get(1, 0), 11.9);
        assert_eq!(panel.get(2, 0), 12.0);

        // IBM is missing on the third date.
        assert_eq!(panel.get(0, 1), 134.2);
        assert_eq!(panel.get(1, 1), 134.9);
        assert!(panel.get(2, 1).is_nan());
    }

    #[test]
    fn test_to_panel_missing_column() {
        let df = df! {
            "symbol" => &["GE"],
            "date" => &["2020-01-06"],
        }
        .unwrap();
        let err = PriceHistory::new(df).to_panel().unwrap_err();
        assert!(matches!(err, RondaError::MissingColumn(c) if c == "close"));
    }

    #[test]
    fn test_to_panel_bad_date() {
        let df = df! {
            "symbol" => &["GE"],
            "date" => &["06/01/2020"],
            "close" => &[11.8],
        }
        .unwrap();
        let err = PriceHistory::new(df).to_panel().unwrap_err();
        assert!(matches!(err, RondaError::InvalidDate(_)));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2020-01-06").unwrap(),
            Date::from_ymd_opt(2020, 1, 6).unwrap()
        );
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_len_and_empty() {
        let history = PriceHistory::new(sample_frame());
        assert_eq!(history.len(), 5);
        assert!(!history.is_empty());
        assert!(PriceHistory::new(DataFrame::default()).is_empty());
    }
}
