//! Yahoo Finance daily price client for Ronda.
//!
//! This crate provides a client for fetching daily OHLCV bars from the
//! keyless [Yahoo Finance](https://finance.yahoo.com/) v8 chart API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use ronda_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new();
//!
//!     let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
//!
//!     // Fetch daily bars for a single symbol
//!     let bars = client.daily_history("GE", start, end).await?;
//!
//!     // Fetch a whole universe, skipping symbols that fail
//!     let universe = vec!["GE".to_string(), "IBM".to_string()];
//!     let histories = client.daily_histories(&universe, start, end).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::YahooClient;
pub use error::YahooError;
pub use types::*;

/// Result type for Yahoo Finance operations.
pub type Result<T> = std::result::Result<T, YahooError>;
