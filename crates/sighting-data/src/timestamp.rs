//! Timestamp Parsing and Hour Flooring

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

const SECONDS_PER_HOUR: i64 = 3600;

/// Date-time layouts seen in the prefectural open-data exports
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a timestamp cell.
///
/// Offset-bearing values keep their local wall-clock time so that the hour
/// feature reflects the time of day at the sighting.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(value, layout).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Truncate a timestamp to the start of its hour
pub fn floor_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_hms_opt(ts.hour(), 0, 0).unwrap_or(ts)
}

/// Whole hours since the Unix epoch, rounded towards negative infinity
pub fn hour_index(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp().div_euclid(SECONDS_PER_HOUR)
}
