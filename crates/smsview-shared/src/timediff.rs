//! Human-readable relative time labels ("3 hours ago", "in 5 minutes").

use chrono::{DateTime, Utc};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Describe the distance between `then` and `now`.
///
/// Thresholds follow the usual "moment-style" buckets: under 45 seconds is
/// "a few seconds", under 90 seconds "a minute", under 45 minutes a count of
/// minutes, and so on up to years.  Counts are rounded to the nearest unit.
pub fn time_diff(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then).num_seconds();
    let span = describe(delta.unsigned_abs());

    if delta < 0 {
        format!("in {span}")
    } else {
        format!("{span} ago")
    }
}

fn describe(secs: u64) -> String {
    match secs {
        s if s < 45 => "a few seconds".to_string(),
        s if s < 90 => "a minute".to_string(),
        s if s < 45 * MINUTE => plural(s, MINUTE, "minutes"),
        s if s < 90 * MINUTE => "an hour".to_string(),
        s if s < 22 * HOUR => plural(s, HOUR, "hours"),
        s if s < 36 * HOUR => "a day".to_string(),
        s if s < 26 * DAY => plural(s, DAY, "days"),
        s if s < 45 * DAY => "a month".to_string(),
        s if s < 320 * DAY => plural(s, MONTH, "months"),
        s if s < 548 * DAY => "a year".to_string(),
        s => plural(s, YEAR, "years"),
    }
}

fn plural(secs: u64, unit: u64, noun: &str) -> String {
    let count = (secs + unit / 2) / unit;
    format!("{count} {noun}")
}
