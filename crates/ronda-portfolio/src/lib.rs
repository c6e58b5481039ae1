//! Portfolio construction for the Ronda momentum backtester.
//!
//! This crate maps cross-sectional momentum ranks into dollar-neutral
//! holdings: each row of ranks is demeaned and scaled by the universe
//! size, shorting past winners and buying past losers.
//!
//! # Example
//!
//! ```ignore
//! use ronda_portfolio::ranks_to_weights;
//!
//! let weights = ranks_to_weights(&ranks)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod weights;

// Re-export key types
pub use weights::{ranks_to_weights, weight_turnover};
