//! Data loading utilities for the Ronda CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use ronda_core::history::{CLOSE_COL, DATE_COL, SYMBOL_COL};
use ronda_core::{Panel, PriceHistory};
use ronda_yahoo::{DailyBar, PriceField, YahooClient};
use std::fs;
use std::path::Path;

/// Merge symbols from the command line with a symbols file.
///
/// File lines are one ticker each; `#` starts a comment and blank lines
/// are skipped. The result is uppercased, sorted and deduplicated.
pub(crate) fn resolve_universe(
    symbols: &[String],
    symbols_file: Option<&Path>,
) -> Result<Vec<String>> {
    let mut universe: Vec<String> = symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(path) = symbols_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading symbols file {}", path.display()))?;
        for line in text.lines() {
            let ticker = line.split('#').next().unwrap_or("").trim();
            if !ticker.is_empty() {
                universe.push(ticker.to_uppercase());
            }
        }
    }

    universe.sort();
    universe.dedup();
    Ok(universe)
}

/// Fetch daily bars for every symbol and pivot them into a price panel.
///
/// Symbols that fail to fetch entirely are skipped by the client; days
/// where the chosen field is missing become NaN cells in the panel.
pub(crate) async fn fetch_price_panel(
    client: &YahooClient,
    symbols: &[String],
    start: NaiveDate,
    end: NaiveDate,
    field: PriceField,
) -> Result<Panel> {
    let histories = client.daily_histories(symbols, start, end).await?;
    bars_to_panel(&histories, field)
}

/// Pivot per-symbol daily bars into a date-by-symbol price panel.
fn bars_to_panel(histories: &[(String, Vec<DailyBar>)], field: PriceField) -> Result<Panel> {
    let mut symbol_col: Vec<String> = Vec::new();
    let mut date_col: Vec<String> = Vec::new();
    let mut close_col: Vec<f64> = Vec::new();

    for (symbol, bars) in histories {
        for bar in bars {
            symbol_col.push(symbol.clone());
            date_col.push(bar.date.clone());
            close_col.push(field.value(bar).unwrap_or(f64::NAN));
        }
    }

    let df = df! {
        SYMBOL_COL => symbol_col,
        DATE_COL => date_col,
        CLOSE_COL => close_col,
    }?;

    Ok(PriceHistory::from(df).to_panel()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> DailyBar {
        DailyBar {
            date: date.to_string(),
            open: None,
            high: None,
            low: None,
            close: Some(close),
            adj_close: Some(close),
            volume: None,
        }
    }

    #[test]
    fn test_resolve_universe_merges_and_dedups() {
        let symbols = vec![
            "ge".to_string(),
            " IBM ".to_string(),
            "GE".to_string(),
            String::new(),
        ];
        let universe = resolve_universe(&symbols, None).unwrap();
        assert_eq!(universe, vec!["GE", "IBM"]);
    }

    #[test]
    fn test_resolve_universe_reads_file() {
        let path = std::env::temp_dir().join("ronda_cli_symbols_test.txt");
        fs::write(&path, "ge\nibm  # legacy industrial\n\n# tech\nGOOG\n").unwrap();

        let universe = resolve_universe(&["AAPL".to_string()], Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(universe, vec!["AAPL", "GE", "GOOG", "IBM"]);
    }

    #[test]
    fn test_resolve_universe_missing_file_is_an_error() {
        let path = Path::new("/nonexistent/ronda_symbols.txt");
        assert!(resolve_universe(&[], Some(path)).is_err());
    }

    #[test]
    fn test_bars_to_panel_pivots_and_pads() {
        let histories = vec![
            (
                "GE".to_string(),
                vec![bar("2020-01-06", 11.85), bar("2020-01-07", 11.95)],
            ),
            ("IBM".to_string(), vec![bar("2020-01-06", 134.0)]),
        ];

        let panel = bars_to_panel(&histories, PriceField::Close).unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.columns(), &["GE".to_string(), "IBM".to_string()]);
        assert_eq!(panel.get(0, 0), 11.85);
        assert_eq!(panel.get(1, 0), 11.95);
        assert_eq!(panel.get(0, 1), 134.0);
        // IBM has no bar on the 7th, so the cell is missing.
        assert!(panel.get(1, 1).is_nan());
    }
}
