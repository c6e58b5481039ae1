//! Cross-sectional momentum backtest.
//!
//! Wires the full pipeline: simple returns, frequency resampling,
//! rolling-sum momentum ranks, dollar-neutral weights, lagged
//! aggregation into portfolio returns, and summary metrics.

use ronda_core::stats::{max_drawdown, sample_std};
use ronda_core::{Date, Panel, Result, RondaError, TimeSeries};
use ronda_portfolio::{ranks_to_weights, weight_turnover};
use ronda_signals::{Frequency, MomentumConfig, rank_signal, resample_last, simple_returns};
use serde::{Deserialize, Serialize};

use crate::metrics::{benchmark_returns, cumulative_wealth, information_ratio, sharpe_ratio};

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Signal construction parameters (window and tail trim).
    pub momentum: MomentumConfig,
    /// Strategy frequency for resampling and annualization.
    pub frequency: Frequency,
    /// Starting capital for the wealth curve.
    pub initial_capital: f64,
    /// Per-period risk-free rate subtracted in the Sharpe numerator.
    pub risk_free: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            momentum: MomentumConfig::default(),
            frequency: Frequency::Weekly,
            initial_capital: 100.0,
            risk_free: 0.0,
        }
    }
}

/// Backtest results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Portfolio period end dates.
    pub dates: Vec<Date>,
    /// Per-period portfolio returns.
    pub returns: Vec<f64>,
    /// Cumulative (summed) returns.
    pub cumulative: Vec<f64>,
    /// Wealth curve, `(cumulative + 1) * initial_capital`.
    pub wealth: Vec<f64>,
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Annualized Information Ratio against the benchmark.
    pub information_ratio: f64,
    /// Final cumulative return.
    pub total_return: f64,
    /// Annualized return volatility.
    pub annualized_volatility: f64,
    /// Maximum drawdown of the wealth curve.
    pub max_drawdown: f64,
    /// Mean one-period weight turnover.
    pub avg_turnover: f64,
    /// Number of portfolio periods.
    pub n_periods: usize,
    /// Number of securities in the universe.
    pub n_securities: usize,
}

/// Portfolio returns from lagged weights.
///
/// Weight rows are aligned into the return index by label and lagged one
/// period: the return at label `t` meets the weight row labeled one
/// return-period earlier. Any row where a weight-times-return product is
/// missing is dropped whole; surviving rows are summed across
/// securities.
///
/// # Errors
///
/// Returns [`RondaError::InvalidData`] when the two panels have
/// different columns.
pub fn aggregate(weights: &Panel, returns: &Panel) -> Result<TimeSeries> {
    if weights.columns() != returns.columns() {
        return Err(RondaError::InvalidData(
            "weights and returns must cover the same securities".to_string(),
        ));
    }

    let m = returns.width();
    let mut index = Vec::new();
    let mut values = Vec::new();

    for t in 1..returns.len() {
        let Some(w_row) = weights.label_position(returns.index()[t - 1]) else {
            continue;
        };
        let mut sum = 0.0;
        let mut complete = true;
        for j in 0..m {
            let product = weights.get(w_row, j) * returns.get(t, j);
            if product.is_nan() {
                complete = false;
                break;
            }
            sum += product;
        }
        if complete {
            index.push(returns.index()[t]);
            values.push(sum);
        }
    }

    TimeSeries::new(index, values)
}

/// Backtesting engine for the cross-sectional momentum strategy.
#[derive(Debug, Clone, Default)]
pub struct Backtest {
    /// Configuration
    config: BacktestConfig,
}

impl Backtest {
    /// Create a new backtest with configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Backtest configuration
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use ronda_eval::{Backtest, BacktestConfig};
    ///
    /// let backtest = Backtest::new(BacktestConfig::default());
    /// let report = backtest.run(&prices, &benchmark)?;
    /// println!("Sharpe: {:.2}", report.sharpe_ratio);
    /// ```
    #[must_use]
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The backtest configuration.
    #[must_use]
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the backtest on a price panel against a benchmark.
    ///
    /// Returns are computed row over row at the input frequency, then
    /// resampled to the strategy frequency keeping the last return per
    /// bin (no intra-bin compounding). The benchmark stays at its native
    /// frequency for the Information Ratio.
    ///
    /// # Arguments
    ///
    /// * `prices` - Price panel of the universe, ascending dates
    /// * `benchmark` - Single-column price panel of the benchmark
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InsufficientHistory`] when the resampled
    /// return history cannot support the configured window and trim, and
    /// [`RondaError::InvalidData`] for shape problems such as a
    /// multi-column benchmark.
    pub fn run(&self, prices: &Panel, benchmark: &Panel) -> Result<BacktestReport> {
        let returns = resample_last(&simple_returns(prices)?, self.config.frequency)?;
        let ranks = rank_signal(&returns, &self.config.momentum)?;
        let weights = ranks_to_weights(&ranks)?;
        let port_ret = aggregate(&weights, &returns)?;

        let (cumulative, wealth) = cumulative_wealth(&port_ret, self.config.initial_capital)?;
        let periods_per_year = self.config.frequency.periods_per_year();

        let sharpe = sharpe_ratio(port_ret.values(), self.config.risk_free, periods_per_year);
        let bench_ret = benchmark_returns(benchmark)?;
        let info_ratio = information_ratio(port_ret.values(), &bench_ret, periods_per_year);

        Ok(BacktestReport {
            sharpe_ratio: sharpe,
            information_ratio: info_ratio,
            total_return: cumulative.last().unwrap_or(f64::NAN),
            annualized_volatility: sample_std(port_ret.values()) * periods_per_year.sqrt(),
            max_drawdown: max_drawdown(wealth.values()),
            avg_turnover: weight_turnover(&weights),
            n_periods: port_ret.len(),
            n_securities: prices.width(),
            dates: port_ret.index().to_vec(),
            returns: port_ret.values().to_vec(),
            cumulative: cumulative.values().to_vec(),
            wealth: wealth.values().to_vec(),
        })
    }
}
