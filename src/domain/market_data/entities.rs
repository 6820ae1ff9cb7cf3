pub use super::value_objects::{Price, Timestamp, Volume};
use crate::domain::errors::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Domain entity - one trading day of a single instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    pub date: NaiveDate,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl OhlcvPoint {
    /// Validating constructor. Raw source values must come through here:
    /// invalid points are rejected, never corrected.
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        if !(open.is_finite() && high.is_finite() && low.is_finite() && close.is_finite()) {
            return Err(ValidationError::NonFinitePrice);
        }
        if open <= 0.0 || close <= 0.0 || high <= 0.0 || low <= 0.0 {
            return Err(ValidationError::NonPositivePrice);
        }
        if high < low {
            return Err(ValidationError::InvertedRange);
        }
        if high < open.max(close) {
            return Err(ValidationError::HighBelowBody);
        }
        if low > open.min(close) {
            return Err(ValidationError::LowAboveBody);
        }
        Ok(Self {
            date,
            open: Price::from(open),
            high: Price::from(high),
            low: Price::from(low),
            close: Price::from(close),
            volume: Volume::from(volume),
        })
    }

    pub fn is_valid(&self) -> bool {
        let (o, h, l, c) = (
            self.open.value(),
            self.high.value(),
            self.low.value(),
            self.close.value(),
        );
        o.is_finite()
            && h.is_finite()
            && l.is_finite()
            && c.is_finite()
            && o > 0.0
            && c > 0.0
            && l > 0.0
            && h >= o.max(c)
            && l <= o.min(c)
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Signed close-to-close move versus a previous point
    pub fn change_from(&self, prior: &OhlcvPoint) -> (f64, f64) {
        let delta = self.close.value() - prior.close.value();
        let pct = if prior.close.value() != 0.0 {
            delta / prior.close.value() * 100.0
        } else {
            0.0
        };
        (delta, pct)
    }
}

/// Domain entity - immutable daily series, strictly increasing by date.
///
/// Construction sorts ascending and deduplicates by date (the later point
/// wins). There is no mutation API: the viewport only ever holds indices
/// into a series, never the series itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    points: Vec<OhlcvPoint>,
}

impl DailySeries {
    pub fn from_points(mut points: Vec<OhlcvPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<OhlcvPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self { points: deduped }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[OhlcvPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&OhlcvPoint> {
        self.points.get(index)
    }

    pub fn last(&self) -> Option<&OhlcvPoint> {
        self.points.last()
    }

    /// Visible sub-range, clamped to the series bounds
    pub fn slice(&self, start: usize, end: usize) -> &[OhlcvPoint] {
        let end = end.min(self.points.len());
        let start = start.min(end);
        &self.points[start..end]
    }

    /// (min low, max high) over a sub-range
    pub fn price_bounds(&self, start: usize, end: usize) -> Option<(f64, f64)> {
        let slice = self.slice(start, end);
        if slice.is_empty() {
            return None;
        }
        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;
        for point in slice {
            min_price = min_price.min(point.low.value());
            max_price = max_price.max(point.high.value());
        }
        Some((min_price, max_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
    }

    #[test]
    fn rejects_inverted_and_non_positive_points() {
        assert_eq!(
            OhlcvPoint::new(day(1), 10.0, 9.0, 11.0, 10.0, 1).unwrap_err(),
            ValidationError::InvertedRange
        );
        assert_eq!(
            OhlcvPoint::new(day(1), -1.0, 12.0, 9.0, 10.0, 1).unwrap_err(),
            ValidationError::NonPositivePrice
        );
        assert_eq!(
            OhlcvPoint::new(day(1), f64::NAN, 12.0, 9.0, 10.0, 1).unwrap_err(),
            ValidationError::NonFinitePrice
        );
    }

    #[test]
    fn rejects_body_outside_wick() {
        assert_eq!(
            OhlcvPoint::new(day(1), 10.0, 10.5, 9.0, 11.0, 1).unwrap_err(),
            ValidationError::HighBelowBody
        );
        assert_eq!(
            OhlcvPoint::new(day(1), 10.0, 11.0, 9.9, 9.8, 1).unwrap_err(),
            ValidationError::LowAboveBody
        );
    }

    #[test]
    fn from_points_sorts_and_dedups_by_date() {
        let a = OhlcvPoint::new(day(3), 10.0, 11.0, 9.0, 10.5, 100).unwrap();
        let b = OhlcvPoint::new(day(1), 10.0, 11.0, 9.0, 10.5, 100).unwrap();
        let c = OhlcvPoint::new(day(3), 20.0, 21.0, 19.0, 20.5, 100).unwrap();
        let series = DailySeries::from_points(vec![a, b, c]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(0).unwrap().date, day(1));
        // later duplicate wins
        assert_eq!(series.get(1).unwrap().open.value(), 20.0);
    }

    #[test]
    fn price_bounds_cover_slice_extremes() {
        let points = vec![
            OhlcvPoint::new(day(1), 10.0, 12.0, 8.0, 11.0, 100).unwrap(),
            OhlcvPoint::new(day(2), 11.0, 15.0, 10.0, 14.0, 100).unwrap(),
        ];
        let series = DailySeries::from_points(points);
        assert_eq!(series.price_bounds(0, 2), Some((8.0, 15.0)));
        assert_eq!(series.price_bounds(1, 2), Some((10.0, 15.0)));
        assert_eq!(series.price_bounds(2, 2), None);
    }
}
