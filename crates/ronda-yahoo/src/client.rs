//! Yahoo Finance chart API client implementation.

use crate::{
    Result,
    error::YahooError,
    types::{ChartResponse, ChartResult, DailyBar},
};
use chrono::{Duration, NaiveDate, NaiveTime};
use reqwest::Client;

/// Base URL for the Yahoo Finance v8 chart API.
const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// User agent sent with every request. Yahoo throttles the default
/// reqwest agent aggressively.
const YAHOO_USER_AGENT: &str = "Mozilla/5.0 (compatible; ronda/0.1)";

/// Yahoo Finance daily price client.
///
/// The chart API is keyless; no configuration is required.
#[derive(Debug, Clone, Default)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    /// Create a new Yahoo Finance client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chart URL for a symbol and unix-second range.
    fn url(&self, symbol: &str, period1: i64, period2: i64) -> String {
        format!(
            "{YAHOO_BASE_URL}/{}?period1={period1}&period2={period2}&interval=1d&events=div%2Csplit",
            symbol.to_uppercase()
        )
    }

    /// Get daily price history for a symbol over an inclusive date range.
    ///
    /// Bars come back in ascending date order. Days where Yahoo reports
    /// no value for a series carry `None` in that field.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "GE")
    /// * `start` - First date to include
    /// * `end` - Last date to include
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response cannot be
    /// parsed, or the API reports no data for the symbol.
    pub async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = (end + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = self.url(symbol, period1, period2);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, YAHOO_USER_AGENT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimited);
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(YahooError::SymbolNotFound(symbol.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(YahooError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        let parsed: ChartResponse = serde_json::from_str(&text)?;

        if let Some(err) = parsed.chart.error {
            return Err(YahooError::Api(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        let result = parsed
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

        let bars = bars_from_result(&result);
        if bars.is_empty() {
            return Err(YahooError::NoData(symbol.to_string()));
        }

        Ok(bars)
    }

    /// Get daily price history for multiple symbols.
    ///
    /// Symbols that fail to fetch are skipped with a warning so one
    /// delisted ticker does not sink the whole universe.
    ///
    /// # Errors
    ///
    /// Returns an error only when every symbol fails.
    pub async fn daily_histories(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(String, Vec<DailyBar>)>> {
        let mut results = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            match self.daily_history(symbol, start, end).await {
                Ok(bars) => results.push((symbol.clone(), bars)),
                Err(e) => {
                    eprintln!("Warning: Failed to fetch data for {symbol}: {e}");
                }
            }
        }

        if results.is_empty() {
            return Err(YahooError::NoData(symbols.join(", ")));
        }

        Ok(results)
    }
}

/// Zip the per-series arrays of a chart result into daily bars.
fn bars_from_result(result: &ChartResult) -> Vec<DailyBar> {
    let quote = result.indicators.quote.first();
    let adjclose = result.indicators.adjclose.first();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(datetime) = chrono::DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        bars.push(DailyBar {
            date: datetime.date_naive().format("%Y-%m-%d").to_string(),
            open: series_value(quote.map(|q| &q.open), i),
            high: series_value(quote.map(|q| &q.high), i),
            low: series_value(quote.map(|q| &q.low), i),
            close: series_value(quote.map(|q| &q.close), i),
            adj_close: series_value(adjclose.map(|a| &a.adjclose), i),
            volume: series_value(quote.map(|q| &q.volume), i),
        });
    }
    bars
}

/// Pick entry `i` out of an optional null-padded series.
fn series_value<T: Copy>(series: Option<&Vec<Option<T>>>, i: usize) -> Option<T> {
    series.and_then(|values| values.get(i)).copied().flatten()
}
