//! Return preparation: simple returns and frequency resampling.
//!
//! Prices arrive at whatever frequency the data provider delivers
//! (typically daily). The strategy operates on resampled returns: simple
//! returns are computed first, row over row, then bucketed into frequency
//! bins keeping the last available observation per bin.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration};
use ndarray::Array2;
use ronda_core::panel::Date;
use ronda_core::{Panel, Result};
use serde::{Deserialize, Serialize};

/// Resampling frequency for return panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Weekly bins labeled by their Sunday end date.
    #[default]
    Weekly,
    /// Calendar-month bins labeled by the last day of the month.
    Monthly,
}

impl Frequency {
    /// The end date of the bin containing `date`.
    #[must_use]
    pub fn period_end(self, date: Date) -> Date {
        match self {
            Self::Weekly => {
                let to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
                date + Duration::days(to_sunday)
            }
            Self::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                Date::from_ymd_opt(year, month, 1).map_or(date, |first| first - Duration::days(1))
            }
        }
    }

    /// Number of periods per year at this frequency, used for
    /// annualization.
    #[must_use]
    pub const fn periods_per_year(self) -> f64 {
        match self {
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
        }
    }
}

/// Row-over-row simple returns of a price panel.
///
/// `r[t] = p[t] / p[t-1] - 1` per column. The leading row is dropped, so
/// the output has one row fewer than the input. A return is missing when
/// either price is missing or the previous price is zero.
///
/// # Errors
///
/// Only shape errors from panel construction; an input with fewer than
/// two rows yields an empty panel.
pub fn simple_returns(prices: &Panel) -> Result<Panel> {
    let n = prices.len();
    let m = prices.width();
    if n < 2 {
        return Panel::new(
            Vec::new(),
            prices.columns().to_vec(),
            Array2::from_elem((0, m), f64::NAN),
        );
    }

    let values = prices.values();
    let mut out = Array2::from_elem((n - 1, m), f64::NAN);
    for i in 1..n {
        for j in 0..m {
            let prev = values[[i - 1, j]];
            let cur = values[[i, j]];
            if prev.is_nan() || cur.is_nan() || prev == 0.0 {
                continue;
            }
            out[[i - 1, j]] = cur / prev - 1.0;
        }
    }

    Panel::new(prices.index()[1..].to_vec(), prices.columns().to_vec(), out)
}

/// Resamples a panel to the given frequency, keeping the last available
/// observation per bin and column.
///
/// Rows are grouped by [`Frequency::period_end`] of their label; the
/// output has one row per observed bin, labeled by the bin end, in
/// ascending order. Within a bin, each column takes its last
/// non-missing value; a column with no observation in the bin stays
/// missing. Bins with no input rows do not appear at all.
///
/// Resampling an already-weekly panel therefore preserves every value
/// and only moves labels to the bin end.
///
/// # Errors
///
/// Only shape errors from panel construction.
pub fn resample_last(panel: &Panel, frequency: Frequency) -> Result<Panel> {
    let m = panel.width();
    let mut bins: BTreeMap<Date, Vec<f64>> = BTreeMap::new();

    for (i, date) in panel.index().iter().enumerate() {
        let label = frequency.period_end(*date);
        let row = bins.entry(label).or_insert_with(|| vec![f64::NAN; m]);
        for j in 0..m {
            let v = panel.get(i, j);
            if !v.is_nan() {
                row[j] = v;
            }
        }
    }

    let index: Vec<Date> = bins.keys().copied().collect();
    let mut values = Array2::from_elem((index.len(), m), f64::NAN);
    for (i, row) in bins.values().enumerate() {
        for (j, v) in row.iter().enumerate() {
            values[[i, j]] = *v;
        }
    }

    Panel::new(index, panel.columns().to_vec(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_period_end_is_sunday() {
        // 2020-01-06 was a Monday, 2020-01-12 the following Sunday.
        assert_eq!(Frequency::Weekly.period_end(date(2020, 1, 6)), date(2020, 1, 12));
        assert_eq!(Frequency::Weekly.period_end(date(2020, 1, 8)), date(2020, 1, 12));
        // A Sunday maps to itself.
        assert_eq!(Frequency::Weekly.period_end(date(2020, 1, 12)), date(2020, 1, 12));
    }

    #[test]
    fn test_monthly_period_end() {
        assert_eq!(Frequency::Monthly.period_end(date(2020, 2, 15)), date(2020, 2, 29));
        assert_eq!(Frequency::Monthly.period_end(date(2020, 12, 10)), date(2020, 12, 31));
        assert_eq!(Frequency::Monthly.period_end(date(2021, 6, 30)), date(2021, 6, 30));
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Frequency::Weekly.periods_per_year(), 52.0);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12.0);
    }

    #[test]
    fn test_simple_returns_basic() {
        let prices = Panel::new(
            vec![date(2020, 1, 5), date(2020, 1, 12), date(2020, 1, 19)],
            vec!["GE".to_string()],
            array![[100.0], [110.0], [99.0]],
        )
        .unwrap();

        let returns = simple_returns(&prices).unwrap();
        assert_eq!(returns.len(), 2);
        assert_eq!(returns.index(), &[date(2020, 1, 12), date(2020, 1, 19)]);
        assert_relative_eq!(returns.get(0, 0), 0.1);
        assert_relative_eq!(returns.get(1, 0), -0.1);
    }

    #[test]
    fn test_simple_returns_missing_and_zero_prev() {
        let prices = Panel::new(
            vec![date(2020, 1, 5), date(2020, 1, 12), date(2020, 1, 19)],
            vec!["A".to_string(), "B".to_string()],
            array![[0.0, f64::NAN], [10.0, 20.0], [11.0, 21.0]],
        )
        .unwrap();

        let returns = simple_returns(&prices).unwrap();
        // Zero previous price and missing previous price both give NaN.
        assert!(returns.get(0, 0).is_nan());
        assert!(returns.get(0, 1).is_nan());
        assert_relative_eq!(returns.get(1, 0), 0.1);
        assert_relative_eq!(returns.get(1, 1), 0.05);
    }

    #[test]
    fn test_simple_returns_short_input() {
        let prices =
            Panel::new(vec![date(2020, 1, 5)], vec!["GE".to_string()], array![[1.0]]).unwrap();
        let returns = simple_returns(&prices).unwrap();
        assert!(returns.is_empty());
        assert_eq!(returns.width(), 1);
    }

    #[test]
    fn test_resample_last_daily_to_weekly() {
        // Mon/Wed/Fri of one week, then Tue of the next.
        let panel = Panel::new(
            vec![date(2020, 1, 6), date(2020, 1, 8), date(2020, 1, 10), date(2020, 1, 14)],
            vec!["A".to_string(), "B".to_string()],
            array![
                [1.0, 10.0],
                [2.0, f64::NAN],
                [f64::NAN, f64::NAN],
                [4.0, 40.0]
            ],
        )
        .unwrap();

        let weekly = resample_last(&panel, Frequency::Weekly).unwrap();
        assert_eq!(weekly.index(), &[date(2020, 1, 12), date(2020, 1, 19)]);
        // Column A: last non-missing in the first week is Wednesday's 2.0.
        assert_relative_eq!(weekly.get(0, 0), 2.0);
        // Column B: only Monday was observed.
        assert_relative_eq!(weekly.get(0, 1), 10.0);
        assert_relative_eq!(weekly.get(1, 0), 4.0);
        assert_relative_eq!(weekly.get(1, 1), 40.0);
    }

    #[test]
    fn test_resample_last_weekly_is_idempotent() {
        // Already-Sunday labels: values unchanged, labels unchanged.
        let panel = Panel::new(
            vec![date(2020, 1, 5), date(2020, 1, 12), date(2020, 1, 19)],
            vec!["A".to_string()],
            array![[0.01], [f64::NAN], [0.03]],
        )
        .unwrap();

        let weekly = resample_last(&panel, Frequency::Weekly).unwrap();
        assert_eq!(weekly.index(), panel.index());
        assert_relative_eq!(weekly.get(0, 0), 0.01);
        assert!(weekly.get(1, 0).is_nan());
        assert_relative_eq!(weekly.get(2, 0), 0.03);
    }

    #[test]
    fn test_resample_skips_empty_bins() {
        // Two observations three weeks apart: no row for the middle week.
        let panel = Panel::new(
            vec![date(2020, 1, 6), date(2020, 1, 20)],
            vec!["A".to_string()],
            array![[1.0], [2.0]],
        )
        .unwrap();

        let weekly = resample_last(&panel, Frequency::Weekly).unwrap();
        assert_eq!(weekly.index(), &[date(2020, 1, 12), date(2020, 1, 26)]);
    }
}
