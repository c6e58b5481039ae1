//! Weekly momentum backtest on live Yahoo Finance data.
//!
//! This example demonstrates:
//! - Downloading daily bars for a stock universe from Yahoo Finance
//! - Pivoting the bars into an aligned price panel
//! - Running the weekly momentum backtest against SPY
//!
//! Needs network access; Yahoo may throttle rapid repeated runs.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use ndarray::Array2;
use ronda::Panel;
use ronda::eval::{Backtest, BacktestConfig, BacktestReport};
use ronda::yahoo::{DailyBar, PriceField, YahooClient};

/// Stock universe to backtest.
const UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "JPM", "V", "WMT", "XOM",
];

/// Benchmark for the Information Ratio.
const BENCHMARK: &str = "SPY";

/// Backtest period. Three calendar years cover the default 48-week
/// window with room to spare.
const START_DATE: &str = "2022-01-01";
const END_DATE: &str = "2024-12-31";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::parse_from_str(START_DATE, "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(END_DATE, "%Y-%m-%d")?;
    let client = YahooClient::new();

    // Download the universe; symbols that fail are skipped with a warning.
    let symbols: Vec<String> = UNIVERSE.iter().map(|s| s.to_string()).collect();
    let histories = client.daily_histories(&symbols, start, end).await?;
    let prices = bars_to_panel(&histories)?.drop_incomplete_columns();
    if prices.width() < 2 {
        return Err("need at least two securities with complete history".into());
    }

    let bench_bars = client.daily_history(BENCHMARK, start, end).await?;
    let benchmark = bars_to_panel(&[(BENCHMARK.to_string(), bench_bars)])?;

    let report = Backtest::new(BacktestConfig::default()).run(&prices, &benchmark)?;
    print_report(&report, &prices);
    Ok(())
}

/// Pivot per-symbol daily bars into a date-by-symbol price panel.
///
/// Dates are the union across symbols; a symbol missing a date gets NaN
/// there.
fn bars_to_panel(
    histories: &[(String, Vec<DailyBar>)],
) -> Result<Panel, Box<dyn std::error::Error>> {
    let mut all_dates = BTreeSet::new();
    for (_, bars) in histories {
        for bar in bars {
            if let Some(date) = bar.parsed_date() {
                all_dates.insert(date);
            }
        }
    }

    let index: Vec<NaiveDate> = all_dates.into_iter().collect();
    let positions: HashMap<NaiveDate, usize> =
        index.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    let mut values = Array2::from_elem((index.len(), histories.len()), f64::NAN);
    for (j, (_, bars)) in histories.iter().enumerate() {
        for bar in bars {
            let Some(i) = bar.parsed_date().and_then(|d| positions.get(&d).copied()) else {
                continue;
            };
            values[[i, j]] = PriceField::AdjClose.value(bar).unwrap_or(f64::NAN);
        }
    }

    let columns = histories.iter().map(|(s, _)| s.clone()).collect();
    Ok(Panel::new(index, columns, values)?)
}

/// Print the report in the style of the CLI summary.
fn print_report(report: &BacktestReport, prices: &Panel) {
    println!("\nYahoo Momentum Backtest");
    println!("═══════════════════════");
    if let (Some(first), Some(last)) = (report.dates.first(), report.dates.last()) {
        println!("Period:     {first} to {last}");
    }
    println!("Universe:   {}", prices.columns().join(", "));
    println!("Benchmark:  {BENCHMARK} (native daily frequency)");
    println!("Periods:    {}", report.n_periods);
    println!();
    println!("Performance:");
    println!("  Total Return:      {:+.1}%", report.total_return * 100.0);
    println!("  Sharpe Ratio:      {:.2}", report.sharpe_ratio);
    println!("  Information Ratio: {:.2}", report.information_ratio);
    println!("  Ann. Volatility:   {:.1}%", report.annualized_volatility * 100.0);
    println!("  Max Drawdown:      {:.1}%", report.max_drawdown * 100.0);
    println!("  Avg Turnover:      {:.2}", report.avg_turnover);
}
