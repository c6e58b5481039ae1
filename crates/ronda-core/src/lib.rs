#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Foundation types for the Ronda cross-sectional momentum backtester.
//!
//! This crate provides the labeled table types the pipeline runs on, the
//! long-format market data container, the shared error type and a few
//! statistics helpers.

/// The version of the ronda-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod history;
pub mod panel;
pub mod stats;

// Re-exports
pub use error::{Result, RondaError};
pub use history::PriceHistory;
pub use panel::{Date, Panel, Symbol, TimeSeries};
