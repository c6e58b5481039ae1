//! Signal construction for the Ronda momentum backtester.
//!
//! This crate turns a price panel into a cross-sectional momentum signal:
//! - Returns: row-over-row simple returns at the input frequency
//! - Resampling: last observation per weekly or monthly bin
//! - Momentum: trailing rolling-sum of returns per security
//! - Ranking: per-row descending ranks with average ties
//!
//! Ranks are shifted forward by the configured tail trim so the most
//! recent periods never feed the signal they label.
//!
//! # Example
//!
//! ```ignore
//! use ronda_signals::{Frequency, MomentumConfig, rank_signal, resample_last, simple_returns};
//!
//! let weekly = resample_last(&simple_returns(&prices)?, Frequency::Weekly)?;
//! let ranks = rank_signal(&weekly, &MomentumConfig::default())?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod rank;
pub mod resample;

// Re-export key types
pub use momentum::{MomentumConfig, rank_signal, rolling_sum};
pub use rank::{rank_descending, rank_rows_descending};
pub use resample::{Frequency, resample_last, simple_returns};
