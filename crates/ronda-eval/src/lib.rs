//! Backtesting and performance evaluation for Ronda.
//!
//! This crate runs the cross-sectional momentum strategy end to end and
//! summarizes the result:
//! - Lagged aggregation of weights against realized returns
//! - Non-compounding cumulative returns and the wealth curve
//! - Annualized Sharpe ratio and Information Ratio
//! - Drawdown, volatility and turnover summaries
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_eval::{Backtest, BacktestConfig};
//!
//! let backtest = Backtest::new(BacktestConfig::default());
//! let report = backtest.run(&prices, &benchmark)?;
//! println!("Sharpe: {:.2}", report.sharpe_ratio);
//! println!("IR:     {:.2}", report.information_ratio);
//! ```

pub mod backtest;
pub mod metrics;

// Re-export main types
pub use backtest::{Backtest, BacktestConfig, BacktestReport, aggregate};
pub use metrics::{benchmark_returns, cumulative_wealth, information_ratio, sharpe_ratio};
