use async_trait::async_trait;

use super::fetch_chart_payload;
use crate::domain::errors::SourceError;
use crate::domain::market_data::{QuoteSource, RawQuotes, SourceKind, Symbol};

const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/raw";
const DEFAULT_UPSTREAM_URL: &str = "https://query2.finance.yahoo.com";

/// Secondary live source: the mirror chart host reached through a CORS
/// relay, for embedding pages the direct host refuses to serve.
pub struct RelayChartClient {
    relay_url: String,
    upstream_url: String,
}

impl RelayChartClient {
    pub fn new() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
        }
    }

    pub fn with_urls(relay_url: impl Into<String>, upstream_url: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            upstream_url: upstream_url.into(),
        }
    }

    pub fn chart_url(&self, symbol: &Symbol, days: u32) -> String {
        let upstream = format!(
            "{}/v8/finance/chart/{}?range={}d&interval=1d",
            self.upstream_url,
            symbol.value(),
            days
        );
        // The relay takes the whole upstream URL as one query parameter
        let query = serde_urlencoded::to_string([("url", upstream.as_str())])
            .unwrap_or_else(|_| format!("url={upstream}"));
        format!("{}?{}", self.relay_url, query)
    }
}

impl Default for RelayChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl QuoteSource for RelayChartClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Secondary
    }

    async fn fetch_daily(&self, symbol: &Symbol, days: u32) -> Result<RawQuotes, SourceError> {
        fetch_chart_payload(&self.chart_url(symbol, days)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_percent_encodes_upstream() {
        let client = RelayChartClient::new();
        let url = client.chart_url(&Symbol::from("MSFT"), 30);
        assert!(url.starts_with("https://api.allorigins.win/raw?url="));
        assert!(url.contains("query2.finance.yahoo.com%2Fv8%2Ffinance%2Fchart%2FMSFT"));
        assert!(!url["https://api.allorigins.win/raw?".len()..].contains("?range"));
    }
}
