use serde::Deserialize;

/// Everything the embedding page supplies. Deserialized from a plain JS
/// object, so every field has a serde default and camelCase naming.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub symbol: String,
    pub days: u32,
    /// When false the live sources are never contacted and the chart
    /// shows simulated data.
    pub use_real_data: bool,
    /// CSS sizes for the mounted component, e.g. "800px" or "100%"
    pub width: String,
    pub height: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            days: 90,
            use_real_data: false,
            width: "800px".to_string(),
            height: "480px".to_string(),
        }
    }
}
