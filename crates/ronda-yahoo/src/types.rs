//! Data types for Yahoo Finance chart API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Price field used when building a close-price panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceField {
    /// Raw close price.
    Close,
    /// Split- and dividend-adjusted close.
    #[default]
    AdjClose,
}

impl PriceField {
    /// Get the command-line parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::AdjClose => "adjclose",
        }
    }

    /// Extract this field from a daily bar.
    ///
    /// The adjusted close falls back to the raw close for days where
    /// the API omits the adjusted series.
    #[must_use]
    pub fn value(&self, bar: &DailyBar) -> Option<f64> {
        match self {
            Self::Close => bar.close,
            Self::AdjClose => bar.adj_close.or(bar.close),
        }
    }
}

impl std::str::FromStr for PriceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "close" => Ok(Self::Close),
            "adjclose" | "adj_close" | "adj-close" => Ok(Self::AdjClose),
            other => Err(format!("unknown price field: {other}")),
        }
    }
}

/// One trading day of prices for a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Open price.
    pub open: Option<f64>,
    /// High price.
    pub high: Option<f64>,
    /// Low price.
    pub low: Option<f64>,
    /// Close price.
    pub close: Option<f64>,
    /// Split- and dividend-adjusted close.
    pub adj_close: Option<f64>,
    /// Volume.
    pub volume: Option<u64>,
}

impl DailyBar {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Top-level chart API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    /// Chart payload.
    pub chart: Chart,
}

/// Chart payload with either results or an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Populated when the API rejects the request.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Error payload from the chart API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartError {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Chart data for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    /// Unix timestamps, one per trading day.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Price and volume series.
    pub indicators: Indicators,
}

/// Indicator blocks of a chart result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicators {
    /// OHLCV series (the API wraps them in a single-element array).
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
    /// Adjusted close series.
    #[serde(default)]
    pub adjclose: Vec<ChartAdjClose>,
}

/// Raw OHLCV series. Entries are null on days a value is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartQuote {
    /// Open prices.
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    /// High prices.
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    /// Low prices.
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    /// Close prices.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    /// Volumes.
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// Adjusted close series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAdjClose {
    /// Adjusted close prices.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "GE"},
                "timestamp": [1578340800, 1578427200],
                "indicators": {
                    "quote": [{
                        "open": [11.93, 11.88],
                        "high": [11.95, 12.01],
                        "low": [11.80, 11.84],
                        "close": [11.85, 11.95],
                        "volume": [51337800, 42627400]
                    }],
                    "adjclose": [{"adjclose": [11.01, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response() {
        let parsed: ChartResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert!(parsed.chart.error.is_none());

        let results = parsed.chart.result.unwrap();
        let result = &results[0];
        assert_eq!(result.timestamp.len(), 2);
        assert_eq!(result.indicators.quote[0].close[0], Some(11.85));
        assert_eq!(result.indicators.adjclose[0].adjclose[1], None);
    }

    #[test]
    fn test_parse_error_response() {
        let text = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;
        let parsed: ChartResponse = serde_json::from_str(text).unwrap();
        assert!(parsed.chart.result.is_none());
        assert_eq!(parsed.chart.error.unwrap().code, "Not Found");
    }

    #[test]
    fn test_price_field_fallback() {
        let bar = DailyBar {
            date: "2020-01-06".to_string(),
            open: Some(11.93),
            high: Some(11.95),
            low: Some(11.80),
            close: Some(11.85),
            adj_close: None,
            volume: Some(51_337_800),
        };
        assert_eq!(PriceField::Close.value(&bar), Some(11.85));
        assert_eq!(PriceField::AdjClose.value(&bar), Some(11.85));
        assert_eq!(bar.parsed_date(), NaiveDate::from_ymd_opt(2020, 1, 6));
    }

    #[test]
    fn test_price_field_from_str() {
        assert_eq!("close".parse::<PriceField>(), Ok(PriceField::Close));
        assert_eq!("adjclose".parse::<PriceField>(), Ok(PriceField::AdjClose));
        assert_eq!("adj-close".parse::<PriceField>(), Ok(PriceField::AdjClose));
        assert!("volume".parse::<PriceField>().is_err());
    }
}
