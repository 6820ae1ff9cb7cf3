use async_trait::async_trait;

use super::fetch_chart_payload;
use crate::domain::errors::SourceError;
use crate::domain::market_data::{QuoteSource, RawQuotes, SourceKind, Symbol};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Primary live source: the chart API queried directly.
pub struct DirectChartClient {
    base_url: String,
}

impl DirectChartClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn chart_url(&self, symbol: &Symbol, days: u32) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}d&interval=1d",
            self.base_url,
            symbol.value(),
            days
        )
    }
}

impl Default for DirectChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl QuoteSource for DirectChartClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Primary
    }

    async fn fetch_daily(&self, symbol: &Symbol, days: u32) -> Result<RawQuotes, SourceError> {
        fetch_chart_payload(&self.chart_url(symbol, days)).await
    }
}
