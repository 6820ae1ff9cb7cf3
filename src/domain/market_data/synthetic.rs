use chrono::{Days, NaiveDate};
use rand::Rng;
use std::f64::consts::TAU;

use super::entities::{DailySeries, OhlcvPoint};
use super::value_objects::{Price, Symbol, Volume};
use crate::domain::logging::{LogComponent, get_logger};

/// Multi-week cycle baked into the walk
const CYCLE_PERIOD_DAYS: f64 = 28.0;
const CYCLE_AMPLITUDE: f64 = 0.004;
/// Pull toward the base price, proportional to relative deviation
const MEAN_REVERSION_STRENGTH: f64 = 0.05;
/// Close perturbation and wick extension, as multiples of daily volatility
const CLOSE_NOISE_FACTOR: f64 = 0.6;
const WICK_FACTOR: f64 = 1.2;
const BASE_VOLUME: f64 = 2_400_000.0;
const VOLUME_MOVE_SENSITIVITY: f64 = 8.0;

/// Per-symbol tuning for the synthetic walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticProfile {
    pub base_price: f64,
    pub price_range: (f64, f64),
    pub daily_volatility: f64,
    pub trend_bias: f64,
}

impl SyntheticProfile {
    pub fn for_symbol(symbol: &Symbol) -> Self {
        match symbol.value() {
            "AAPL" => Self { base_price: 230.0, price_range: (150.0, 320.0), daily_volatility: 0.014, trend_bias: 0.0006 },
            "MSFT" => Self { base_price: 420.0, price_range: (280.0, 560.0), daily_volatility: 0.013, trend_bias: 0.0007 },
            "GOOG" | "GOOGL" => Self { base_price: 175.0, price_range: (110.0, 250.0), daily_volatility: 0.015, trend_bias: 0.0005 },
            "AMZN" => Self { base_price: 195.0, price_range: (120.0, 280.0), daily_volatility: 0.017, trend_bias: 0.0005 },
            "NVDA" => Self { base_price: 125.0, price_range: (60.0, 220.0), daily_volatility: 0.026, trend_bias: 0.0012 },
            "TSLA" => Self { base_price: 250.0, price_range: (120.0, 420.0), daily_volatility: 0.030, trend_bias: 0.0 },
            "BTC-USD" => Self { base_price: 64_000.0, price_range: (30_000.0, 110_000.0), daily_volatility: 0.032, trend_bias: 0.0008 },
            "ETH-USD" => Self { base_price: 3_100.0, price_range: (1_500.0, 5_500.0), daily_volatility: 0.036, trend_bias: 0.0006 },
            _ => Self::default(),
        }
    }
}

impl Default for SyntheticProfile {
    fn default() -> Self {
        Self {
            base_price: 100.0,
            price_range: (40.0, 250.0),
            daily_volatility: 0.018,
            trend_bias: 0.0004,
        }
    }
}

/// Mean-reverting stochastic walk standing in for a live quote feed.
///
/// Deterministic in model only: callers inject the random source, so
/// tests can pin a seed and assert structure rather than exact prices.
pub struct SyntheticGenerator {
    profile: SyntheticProfile,
}

impl SyntheticGenerator {
    pub fn new(profile: SyntheticProfile) -> Self {
        Self { profile }
    }

    pub fn for_symbol(symbol: &Symbol) -> Self {
        Self::new(SyntheticProfile::for_symbol(symbol))
    }

    /// Produce `days + 1` points ending at `end_date`, oldest first.
    pub fn generate<R: Rng>(&self, end_date: NaiveDate, days: u32, rng: &mut R) -> DailySeries {
        let SyntheticProfile {
            base_price,
            price_range: (floor, ceil),
            daily_volatility,
            trend_bias,
        } = self.profile;

        let start = end_date
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        let mut price = base_price;
        let mut points = Vec::with_capacity(days as usize + 1);

        for (i, date) in start.iter_days().take(days as usize + 1).enumerate() {
            let cyclical = CYCLE_AMPLITUDE * (i as f64 * TAU / CYCLE_PERIOD_DAYS).sin();
            let noise = rng.random_range(-1.0..=1.0) * daily_volatility;
            let reversion = MEAN_REVERSION_STRENGTH * (base_price - price) / base_price;
            let daily_delta = trend_bias + cyclical + noise + reversion;

            price = (price * (1.0 + daily_delta)).clamp(floor, ceil);

            let open = price;
            let close_noise = rng.random_range(-1.0..=1.0) * daily_volatility * CLOSE_NOISE_FACTOR;
            let close = (open * (1.0 + close_noise)).clamp(floor, ceil);

            // Wick extensions are kept small enough that low stays positive
            let up_ext = rng.random_range(0.0..=daily_volatility * WICK_FACTOR).min(0.5);
            let down_ext = rng.random_range(0.0..=daily_volatility * WICK_FACTOR).min(0.5);
            // Enclosing bounds by construction: clamping open/close can only
            // shrink the body, never push it outside [low, high]
            let high = open.max(close) * (1.0 + up_ext);
            let low = open.min(close) * (1.0 - down_ext);

            let relative_move = ((close - open) / open).abs();
            let volume = (BASE_VOLUME
                * (1.0 + VOLUME_MOVE_SENSITIVITY * relative_move)
                * rng.random_range(0.6..=1.4)) as u64;

            let point = OhlcvPoint {
                date,
                open: Price::from(open),
                high: Price::from(high),
                low: Price::from(low),
                close: Price::from(close),
                volume: Volume::from(volume),
            };
            debug_assert!(point.is_valid());
            points.push(point);
        }

        get_logger().debug(
            LogComponent::Domain("Synthetic"),
            &format!(
                "generated {} synthetic points ending {end_date}",
                points.len()
            ),
        );

        DailySeries::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn emits_days_plus_one_points_ending_at_end_date() {
        let mut rng = SmallRng::seed_from_u64(7);
        let series = SyntheticGenerator::new(SyntheticProfile::default())
            .generate(end_date(), 90, &mut rng);
        assert_eq!(series.len(), 91);
        assert_eq!(series.last().unwrap().date, end_date());
        assert_eq!(
            series.get(0).unwrap().date,
            end_date().checked_sub_days(Days::new(90)).unwrap()
        );
    }

    #[test]
    fn every_point_satisfies_series_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        let series = SyntheticGenerator::for_symbol(&Symbol::from("TSLA"))
            .generate(end_date(), 250, &mut rng);
        for point in series.points() {
            assert!(point.is_valid(), "invalid point {point:?}");
        }
        for pair in series.points().windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn walk_stays_inside_profile_price_range() {
        let profile = SyntheticProfile {
            base_price: 100.0,
            price_range: (80.0, 120.0),
            daily_volatility: 0.05,
            trend_bias: 0.01,
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let series = SyntheticGenerator::new(profile).generate(end_date(), 200, &mut rng);
        for point in series.points() {
            assert!(point.open.value() >= 80.0 && point.open.value() <= 120.0);
            assert!(point.close.value() >= 80.0 && point.close.value() <= 120.0);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let generator = SyntheticGenerator::new(SyntheticProfile::default());
        let a = generator.generate(end_date(), 60, &mut SmallRng::seed_from_u64(9));
        let b = generator.generate(end_date(), 60, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
