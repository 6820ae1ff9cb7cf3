use stock_chart_wasm::application::acquisition::normalize;
use stock_chart_wasm::domain::market_data::RawQuotes;

const DAY: i64 = 86_400;
const BASE_TS: i64 = 1_780_000_000;

fn slot(raw: &mut RawQuotes, ts: i64, o: f64, h: f64, l: f64, c: f64, v: u64) {
    raw.timestamps.push(ts);
    raw.opens.push(Some(o));
    raw.highs.push(Some(h));
    raw.lows.push(Some(l));
    raw.closes.push(Some(c));
    raw.volumes.push(Some(v));
}

#[test]
fn valid_slots_zip_into_a_sorted_series() {
    let mut raw = RawQuotes::default();
    // Deliberately out of order - normalization must sort ascending
    slot(&mut raw, BASE_TS + 2 * DAY, 12.0, 13.0, 11.0, 12.5, 300);
    slot(&mut raw, BASE_TS, 10.0, 11.0, 9.0, 10.5, 100);
    slot(&mut raw, BASE_TS + DAY, 11.0, 12.0, 10.0, 11.5, 200);

    let (series, dropped) = normalize(&raw);
    assert_eq!(series.len(), 3);
    assert_eq!(dropped, 0);
    for pair in series.points().windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert_eq!(series.get(0).unwrap().volume.value(), 100);
}

#[test]
fn null_fields_drop_the_slot() {
    let mut raw = RawQuotes::default();
    slot(&mut raw, BASE_TS, 10.0, 11.0, 9.0, 10.5, 100);
    raw.timestamps.push(BASE_TS + DAY);
    raw.opens.push(None);
    raw.highs.push(Some(12.0));
    raw.lows.push(Some(10.0));
    raw.closes.push(Some(11.5));
    raw.volumes.push(Some(200));

    let (series, dropped) = normalize(&raw);
    assert_eq!(series.len(), 1);
    assert_eq!(dropped, 1);
}

#[test]
fn invalid_points_are_dropped_not_corrected() {
    let mut raw = RawQuotes::default();
    slot(&mut raw, BASE_TS, 10.0, 9.0, 11.0, 10.0, 100); // high < low
    slot(&mut raw, BASE_TS + DAY, -5.0, 12.0, 4.0, 10.0, 100); // open <= 0
    slot(&mut raw, BASE_TS + 2 * DAY, f64::INFINITY, 12.0, 9.0, 10.0, 100); // non-finite
    slot(&mut raw, BASE_TS + 3 * DAY, 10.0, 11.0, 9.0, 10.5, 100);

    let (series, dropped) = normalize(&raw);
    assert_eq!(series.len(), 1);
    assert_eq!(dropped, 3);
    assert!(series.points().iter().all(|p| p.is_valid()));
}

#[test]
fn duplicate_dates_collapse_to_the_later_slot() {
    let mut raw = RawQuotes::default();
    slot(&mut raw, BASE_TS, 10.0, 11.0, 9.0, 10.5, 100);
    // Same calendar day, later wins
    slot(&mut raw, BASE_TS + 3600, 20.0, 21.0, 19.0, 20.5, 999);

    let (series, dropped) = normalize(&raw);
    assert_eq!(series.len(), 1);
    assert_eq!(dropped, 1);
    assert_eq!(series.get(0).unwrap().open.value(), 20.0);
}

#[test]
fn ragged_arrays_drop_short_slots() {
    let mut raw = RawQuotes::default();
    slot(&mut raw, BASE_TS, 10.0, 11.0, 9.0, 10.5, 100);
    // Timestamp without any matching quote fields
    raw.timestamps.push(BASE_TS + DAY);

    let (series, dropped) = normalize(&raw);
    assert_eq!(series.len(), 1);
    assert_eq!(dropped, 1);
}

#[test]
fn all_invalid_input_yields_empty_series() {
    let mut raw = RawQuotes::default();
    slot(&mut raw, BASE_TS, 0.0, 1.0, 0.0, 0.5, 10);
    let (series, dropped) = normalize(&raw);
    assert!(series.is_empty());
    assert_eq!(dropped, 1);
}
