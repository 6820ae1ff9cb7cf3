use rand::Rng;

use crate::domain::errors::{AllSourcesExhausted, SourceError, summarize_failures};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{
    DailySeries, OhlcvPoint, QuoteSource, RawQuotes, SourceKind, Symbol, SyntheticGenerator,
    Timestamp,
};
use crate::time_utils::{date_from_unix_millis, date_from_unix_seconds};

/// Caller knobs for one acquisition run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionOptions {
    pub days: u32,
    /// When false the live sources are skipped entirely and the chain
    /// goes straight to the synthetic generator.
    pub use_real_data: bool,
    /// When false a fully failed chain becomes `AllSourcesExhausted`
    /// instead of falling back to synthetic data.
    pub allow_synthetic: bool,
}

impl Default for AcquisitionOptions {
    fn default() -> Self {
        Self {
            days: 90,
            use_real_data: false,
            allow_synthetic: true,
        }
    }
}

/// What one load/refresh produced. Held by the owning component until the
/// next request supersedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionResult {
    pub series: DailySeries,
    pub source: SourceKind,
    pub as_of: Timestamp,
    /// Present when something degraded: a fallback happened or points
    /// were dropped during normalization.
    pub warning: Option<String>,
}

/// Walks live sources in priority order, normalizes the winner, and
/// falls back to the synthetic generator when everything real fails.
///
/// `acquire` never panics and never surfaces a single source's failure:
/// the only error it returns is the terminal `AllSourcesExhausted`.
pub struct AcquisitionChain {
    sources: Vec<Box<dyn QuoteSource>>,
}

impl AcquisitionChain {
    pub fn new(sources: Vec<Box<dyn QuoteSource>>) -> Self {
        Self { sources }
    }

    pub async fn acquire<R: Rng>(
        &self,
        symbol: &Symbol,
        options: &AcquisitionOptions,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<AcquisitionResult, AllSourcesExhausted> {
        let mut failures: Vec<(SourceKind, SourceError)> = Vec::new();

        if options.use_real_data {
            for source in &self.sources {
                let kind = source.kind();
                get_logger().info(
                    LogComponent::Application("Acquisition"),
                    &format!("trying {kind} source for {} ({}d)", symbol.value(), options.days),
                );
                match source.fetch_daily(symbol, options.days).await {
                    Ok(raw) => {
                        let (series, dropped) = normalize(&raw);
                        if series.is_empty() {
                            get_logger().warn(
                                LogComponent::Application("Acquisition"),
                                &format!("{kind} source returned no usable points"),
                            );
                            failures.push((kind, SourceError::EmptyDataset));
                            continue;
                        }
                        let warning = (dropped > 0).then(|| {
                            format!("{dropped} invalid data points dropped during normalization")
                        });
                        get_logger().info(
                            LogComponent::Application("Acquisition"),
                            &format!("{kind} source delivered {} points", series.len()),
                        );
                        return Ok(AcquisitionResult {
                            series,
                            source: kind,
                            as_of: Timestamp::from(now_ms),
                            warning,
                        });
                    }
                    Err(err) => {
                        get_logger().warn(
                            LogComponent::Application("Acquisition"),
                            &format!("{kind} source failed: {err}"),
                        );
                        failures.push((kind, err));
                    }
                }
            }
        }

        if !options.allow_synthetic {
            get_logger().error(
                LogComponent::Application("Acquisition"),
                &format!("all sources exhausted for {}", symbol.value()),
            );
            return Err(AllSourcesExhausted { failures });
        }

        let end_date = date_from_unix_millis(now_ms).unwrap_or_default();
        let series = SyntheticGenerator::for_symbol(symbol).generate(end_date, options.days, rng);
        let warning = options.use_real_data.then(|| {
            format!(
                "showing simulated data - live sources unavailable ({})",
                summarize_failures(&failures)
            )
        });
        get_logger().info(
            LogComponent::Application("Acquisition"),
            &format!("synthesized {} points for {}", series.len(), symbol.value()),
        );
        Ok(AcquisitionResult {
            series,
            source: SourceKind::Synthetic,
            as_of: Timestamp::from(now_ms),
            warning,
        })
    }
}

/// Zip raw quote arrays by index into validated points. Slots with a null
/// field, an unrepresentable timestamp, or a point failing series
/// validation are dropped and counted, never corrected. Duplicate dates
/// collapse during series construction and count as dropped too.
pub fn normalize(raw: &RawQuotes) -> (DailySeries, usize) {
    let mut points: Vec<OhlcvPoint> = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for (i, &ts) in raw.timestamps.iter().enumerate() {
        let slot = (
            date_from_unix_seconds(ts),
            field(&raw.opens, i),
            field(&raw.highs, i),
            field(&raw.lows, i),
            field(&raw.closes, i),
            field(&raw.volumes, i),
        );
        let (Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) = slot
        else {
            dropped += 1;
            continue;
        };
        match OhlcvPoint::new(date, open, high, low, close, volume) {
            Ok(point) => points.push(point),
            Err(_) => dropped += 1,
        }
    }

    let valid = points.len();
    let series = DailySeries::from_points(points);
    dropped += valid - series.len();
    (series, dropped)
}

fn field<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}
