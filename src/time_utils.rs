use chrono::{DateTime, NaiveDate};

/// Calendar day for an epoch-seconds quote timestamp, if representable.
pub fn date_from_unix_seconds(secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

/// Calendar day for an epoch-milliseconds clock reading.
pub fn date_from_unix_millis(millis: u64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
}

/// Axis label for one candle's date, e.g. "Jun 12".
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Price label with decimals scaled to magnitude, so a $64k coin and a
/// $4 penny stock both read naturally on the axis.
pub fn format_price(price: f64) -> String {
    if price >= 10_000.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

/// Wall-clock label for log lines, e.g. "14:03:59".
pub fn format_clock(millis: u64) -> String {
    DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| format!("{millis}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_label_format() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 12).unwrap();
        assert_eq!(format_date_label(date), "Jun 12");
    }

    #[test]
    fn price_label_scales_decimals() {
        assert_eq!(format_price(64123.4), "$64123");
        assert_eq!(format_price(423.25), "$423.25");
        assert_eq!(format_price(4.237), "$4.24");
    }

    #[test]
    fn epoch_conversions() {
        // 2026-08-06 00:00:00 UTC
        let date = date_from_unix_seconds(1_785_974_400).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        assert_eq!(date_from_unix_millis(0).unwrap(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }
}
