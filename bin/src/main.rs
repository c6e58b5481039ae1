//! Ronda CLI binary.
//!
//! Provides command-line interface for the Ronda momentum backtester.

mod data;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use ronda_core::history::parse_date;
use ronda_eval::{Backtest, BacktestConfig, BacktestReport};
use ronda_portfolio::ranks_to_weights;
use ronda_signals::{Frequency, MomentumConfig, rank_signal, resample_last, simple_returns};
use ronda_yahoo::{PriceField, YahooClient};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Cross-sectional momentum backtester", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cross-sectional momentum backtest
    Backtest {
        /// Ticker symbol(s)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// File with one ticker per line (# starts a comment)
        #[arg(long)]
        symbols_file: Option<PathBuf>,

        /// Benchmark symbol
        #[arg(short, long, default_value = "SPY")]
        benchmark: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Momentum window in periods
        #[arg(short, long, default_value = "48")]
        window: usize,

        /// Most recent periods excluded from the signal
        #[arg(long, default_value = "4")]
        trim: usize,

        /// Strategy frequency (weekly or monthly)
        #[arg(long, default_value = "weekly")]
        frequency: String,

        /// Starting capital for the wealth curve
        #[arg(long, default_value = "100")]
        capital: f64,

        /// Per-period risk-free rate
        #[arg(long, default_value = "0")]
        risk_free: f64,

        /// Price field (close or adjclose)
        #[arg(long, default_value = "adjclose")]
        field: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Draw the wealth curve
        #[arg(long)]
        chart: bool,
    },

    /// Show the latest momentum ranks and weights
    Ranks {
        /// Ticker symbol(s)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// File with one ticker per line (# starts a comment)
        #[arg(long)]
        symbols_file: Option<PathBuf>,

        /// Date to rank as of (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        end: Option<String>,

        /// Momentum window in periods
        #[arg(short, long, default_value = "48")]
        window: usize,

        /// Most recent periods excluded from the signal
        #[arg(long, default_value = "4")]
        trim: usize,

        /// Strategy frequency (weekly or monthly)
        #[arg(long, default_value = "weekly")]
        frequency: String,

        /// Price field (close or adjclose)
        #[arg(long, default_value = "adjclose")]
        field: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            symbols,
            symbols_file,
            benchmark,
            start,
            end,
            window,
            trim,
            frequency,
            capital,
            risk_free,
            field,
            format,
            chart,
        } => {
            run_backtest(
                &symbols,
                symbols_file.as_deref(),
                &benchmark,
                &start,
                &end,
                window,
                trim,
                &frequency,
                capital,
                risk_free,
                &field,
                &format,
                chart,
            )
            .await?;
        }
        Commands::Ranks {
            symbols,
            symbols_file,
            end,
            window,
            trim,
            frequency,
            field,
        } => {
            show_ranks(
                &symbols,
                symbols_file.as_deref(),
                end.as_deref(),
                window,
                trim,
                &frequency,
                &field,
            )
            .await?;
        }
    }

    Ok(())
}

/// Parse a frequency flag into a strategy frequency.
fn parse_frequency(value: &str) -> Option<Frequency> {
    match value.to_lowercase().as_str() {
        "weekly" | "week" | "w" => Some(Frequency::Weekly),
        "monthly" | "month" | "m" => Some(Frequency::Monthly),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_backtest(
    symbols: &[String],
    symbols_file: Option<&Path>,
    benchmark: &str,
    start: &str,
    end: &str,
    window: usize,
    trim: usize,
    frequency: &str,
    capital: f64,
    risk_free: f64,
    field: &str,
    format: &str,
    chart: bool,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Momentum Backtest                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let freq = match parse_frequency(frequency) {
        Some(f) => f,
        None => {
            println!(
                "Error: Unknown frequency '{}'. Use 'weekly' or 'monthly'.",
                frequency
            );
            return Ok(());
        }
    };

    let price_field = match field.parse::<PriceField>() {
        Ok(f) => f,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let universe = data::resolve_universe(symbols, symbols_file)?;
    if universe.is_empty() {
        println!("Error: No symbols given. Use --symbols or --symbols-file.");
        return Ok(());
    }

    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    println!("Universe:  {} symbols", universe.len());
    println!("Benchmark: {}", benchmark);
    println!("Period:    {} to {}", start, end);
    println!(
        "Signal:    {}-period window, {} periods trimmed, {}",
        window, trim, frequency
    );
    println!("Field:     {}", price_field.as_str());
    println!();

    println!("Fetching market data for {} symbol(s)...", universe.len());

    let client = YahooClient::new();
    let full =
        data::fetch_price_panel(&client, &universe, start_date, end_date, price_field).await?;
    let prices = full.drop_incomplete_columns();

    if prices.width() < full.width() {
        println!(
            "Dropped {} symbol(s) with incomplete history",
            full.width() - prices.width()
        );
    }
    println!("Loaded {} rows for {} symbols", prices.len(), prices.width());

    if prices.width() < 2 {
        println!("Error: Need at least 2 symbols with complete history to rank.");
        return Ok(());
    }

    println!("Fetching benchmark {}...", benchmark);
    let bench = data::fetch_price_panel(
        &client,
        &[benchmark.to_uppercase()],
        start_date,
        end_date,
        price_field,
    )
    .await?;
    println!();

    let config = BacktestConfig {
        momentum: MomentumConfig {
            window_periods: window,
            tail_trim_periods: trim,
        },
        frequency: freq,
        initial_capital: capital,
        risk_free,
    };

    let backtest = Backtest::new(config);
    let report = match backtest.run(&prices, &bench) {
        Ok(r) => r,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("BACKTEST RESULTS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    if format == "json" {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
    } else {
        println!("Performance Metrics:");
        println!(
            "  Total Return:      {:>10.2}%",
            report.total_return * 100.0
        );
        println!(
            "  Annualized Vol:    {:>10.2}%",
            report.annualized_volatility * 100.0
        );
        println!("  Sharpe Ratio:      {:>10.2}", report.sharpe_ratio);
        println!("  Information Ratio: {:>10.2}", report.information_ratio);
        println!(
            "  Max Drawdown:      {:>10.2}%",
            report.max_drawdown * 100.0
        );
        println!();

        println!("Trading Metrics:");
        println!(
            "  Avg Turnover:      {:>10.2}%",
            report.avg_turnover * 100.0
        );
        println!("  Periods:           {:>10}", report.n_periods);
        println!("  Securities:        {:>10}", report.n_securities);
        if let (Some(first), Some(last)) = (report.dates.first(), report.dates.last()) {
            println!("  First Period:      {:>10}", first);
            println!("  Last Period:       {:>10}", last);
        }
        if let Some(wealth) = report.wealth.last() {
            println!("  Final Wealth:      {:>10.2}", wealth);
        }
        println!();

        if chart {
            print_wealth_chart(&report);
        }
    }

    Ok(())
}

/// Text chart of the wealth curve, sampled down to at most 48 rows.
fn print_wealth_chart(report: &BacktestReport) {
    let finite: Vec<f64> = report
        .wealth
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .collect();
    let Some(&min) = finite.iter().min_by(|a, b| a.total_cmp(b)) else {
        return;
    };
    let Some(&max) = finite.iter().max_by(|a, b| a.total_cmp(b)) else {
        return;
    };

    let span = max - min;
    let step = report.wealth.len().div_ceil(48).max(1);

    println!("Wealth Curve:");
    for (date, wealth) in report
        .dates
        .iter()
        .zip(report.wealth.iter())
        .step_by(step)
    {
        let bar_len = if span > 0.0 {
            ((wealth - min) / span * 40.0).round() as usize
        } else {
            0
        };
        println!("  {}  {:>10.2} │{}│", date, wealth, "█".repeat(bar_len));
    }
    println!();
}

async fn show_ranks(
    symbols: &[String],
    symbols_file: Option<&Path>,
    end: Option<&str>,
    window: usize,
    trim: usize,
    frequency: &str,
    field: &str,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Momentum Ranks                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let freq = match parse_frequency(frequency) {
        Some(f) => f,
        None => {
            println!(
                "Error: Unknown frequency '{}'. Use 'weekly' or 'monthly'.",
                frequency
            );
            return Ok(());
        }
    };

    let price_field = match field.parse::<PriceField>() {
        Ok(f) => f,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let universe = data::resolve_universe(symbols, symbols_file)?;
    if universe.is_empty() {
        println!("Error: No symbols given. Use --symbols or --symbols-file.");
        return Ok(());
    }

    let end_date: NaiveDate = end
        .map(parse_date)
        .transpose()?
        .unwrap_or_else(|| Utc::now().date_naive());

    let config = MomentumConfig {
        window_periods: window,
        tail_trim_periods: trim,
    };

    // Convert the required periods to calendar days with headroom for
    // holidays and missing bars.
    let calendar_days =
        (config.min_history() as f64 * 365.25 / freq.periods_per_year() * 1.2) as i64 + 30;
    let start_date = end_date - Duration::days(calendar_days);

    println!("Universe:  {} symbols", universe.len());
    println!("As of:     {}", end_date);
    println!(
        "Signal:    {}-period window, {} periods trimmed, {}",
        window, trim, frequency
    );
    println!();

    println!("Fetching market data for {} symbol(s)...", universe.len());

    let client = YahooClient::new();
    let full =
        data::fetch_price_panel(&client, &universe, start_date, end_date, price_field).await?;
    let prices = full.drop_incomplete_columns();

    if prices.width() < full.width() {
        println!(
            "Dropped {} symbol(s) with incomplete history",
            full.width() - prices.width()
        );
    }
    println!("Loaded {} rows for {} symbols", prices.len(), prices.width());

    if prices.width() < 2 {
        println!("Error: Need at least 2 symbols with complete history to rank.");
        return Ok(());
    }
    println!();

    let returns = resample_last(&simple_returns(&prices)?, freq)?;
    let ranks = match rank_signal(&returns, &config) {
        Ok(r) => r,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    let weights = ranks_to_weights(&ranks)?;

    let Some(row) = ranks.len().checked_sub(1) else {
        println!("No rank rows produced.");
        return Ok(());
    };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("RANKS (as of {})", ranks.index()[row]);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    let mut table: Vec<(&str, f64, f64)> = ranks
        .columns()
        .iter()
        .enumerate()
        .filter(|(j, _)| !ranks.get(row, *j).is_nan())
        .map(|(j, symbol)| (symbol.as_str(), ranks.get(row, j), weights.get(row, j)))
        .collect();
    table.sort_by(|a, b| a.1.total_cmp(&b.1));

    println!("{:<10} {:>8} {:>12}", "Symbol", "Rank", "Weight");
    println!("{}", "─".repeat(32));
    for (symbol, rank, weight) in table {
        println!("{:<10} {:>8.1} {:>12.4}", symbol, rank, weight);
    }
    println!();
    println!("Rank 1 is the strongest trailing performer and carries the most");
    println!("negative weight: the book shorts winners and buys losers.");
    println!();

    Ok(())
}
