use serde::Deserialize;

use crate::domain::errors::SourceError;
use crate::domain::market_data::RawQuotes;

/// Wire shape of the chart API both live sources speak. Only the fields
/// normalization needs are modeled; everything else in the payload is
/// ignored on deserialization.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartResponse {
    /// Pull the parallel quote arrays out of the envelope. An error body
    /// or a missing result block counts as a malformed payload - the
    /// chain treats it the same as an unparseable response.
    pub fn into_raw_quotes(self) -> Result<RawQuotes, SourceError> {
        if let Some(error) = self.chart.error {
            let description = error
                .description
                .or(error.code)
                .unwrap_or_else(|| "unspecified api error".to_string());
            return Err(SourceError::MalformedPayload(description));
        }
        let result = self
            .chart
            .result
            .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
            .ok_or_else(|| SourceError::MalformedPayload("empty result block".to_string()))?;
        let timestamps = result
            .timestamp
            .ok_or_else(|| SourceError::MalformedPayload("missing timestamp array".to_string()))?;
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        Ok(RawQuotes {
            timestamps,
            opens: quote.open,
            highs: quote.high,
            lows: quote.low,
            closes: quote.close,
            volumes: quote.volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_arrays_with_nulls() {
        let response: ChartResponse = serde_json::from_str(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1754006400, 1754092800],
                        "indicators": {
                            "quote": [{
                                "open": [101.2, null],
                                "high": [103.5, 104.0],
                                "low": [100.1, 101.9],
                                "close": [102.8, 103.1],
                                "volume": [1200000, 980000]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();
        let raw = response.into_raw_quotes().unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.opens[0], Some(101.2));
        assert_eq!(raw.opens[1], None);
        assert_eq!(raw.volumes[1], Some(980_000));
    }

    #[test]
    fn error_body_is_malformed_payload() {
        let response: ChartResponse = serde_json::from_str(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}}"#,
        )
        .unwrap();
        let err = response.into_raw_quotes().unwrap_err();
        assert!(matches!(err, SourceError::MalformedPayload(msg) if msg == "No data found"));
    }

    #[test]
    fn missing_timestamps_is_malformed_payload() {
        let response: ChartResponse = serde_json::from_str(
            r#"{"chart": {"result": [{"indicators": {"quote": []}}], "error": null}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.into_raw_quotes().unwrap_err(),
            SourceError::MalformedPayload(_)
        ));
    }
}
