use async_trait::async_trait;

use super::value_objects::{SourceKind, Symbol};
use crate::domain::errors::SourceError;

/// Raw quote arrays as live sources ship them: one timestamp array plus
/// per-field arrays zipped by index. Slots may be null upstream, hence
/// the `Option` elements; normalization decides what to drop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuotes {
    /// Seconds since the Unix epoch, one per slot
    pub timestamps: Vec<i64>,
    pub opens: Vec<Option<f64>>,
    pub highs: Vec<Option<f64>>,
    pub lows: Vec<Option<f64>>,
    pub closes: Vec<Option<f64>>,
    pub volumes: Vec<Option<u64>>,
}

impl RawQuotes {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Strategy seam for live quote providers. The acquisition chain walks a
/// list of these in priority order; it never knows which vendor is behind
/// a given entry.
#[async_trait(?Send)]
pub trait QuoteSource {
    fn kind(&self) -> SourceKind;

    /// Fetch roughly `days` daily quotes for `symbol`, newest last or in
    /// any order - the chain sorts during normalization.
    async fn fetch_daily(&self, symbol: &Symbol, days: u32) -> Result<RawQuotes, SourceError>;
}
