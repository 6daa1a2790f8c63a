//! Resolving a take's timestamp into an age in hours.
//!
//! Absolute instants are exact.  Relative descriptors (`"3 days ago"`) are a
//! compatibility path for older feeds: a month is always 30 days, and any
//! text that does not match resolves to age zero, which gives the take the
//! maximum recency score instead of failing.
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::schema::TakeTimestamp;

const MS_PER_HOUR: f64 = 3_600_000.0;

fn relative_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+) (second|minute|hour|day|week|month)s? ago")
            .expect("relative age pattern is valid")
    })
}

/// Milliseconds per unit.  `None` for anything outside the supported set.
fn unit_millis(unit: &str) -> Option<i64> {
    match unit.to_ascii_lowercase().as_str() {
        "second" => Some(1_000),
        "minute" => Some(60_000),
        "hour" => Some(3_600_000),
        "day" => Some(86_400_000),
        "week" => Some(604_800_000),
        "month" => Some(2_592_000_000),
        _ => None,
    }
}

/// Parse `"<n> <unit>[s] ago"` into milliseconds.
///
/// Returns `None` when the text does not match or the amount overflows.
pub fn parse_relative_millis(text: &str) -> Option<i64> {
    let caps = relative_pattern().captures(text)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let per_unit = unit_millis(caps.get(2)?.as_str())?;
    amount.checked_mul(per_unit)
}

/// Age of `timestamp` relative to `now`, in hours.  Never negative.
pub fn age_hours(timestamp: Option<&TakeTimestamp>, now: DateTime<Utc>) -> f64 {
    let millis = match timestamp {
        None => 0,
        Some(TakeTimestamp::Relative(text)) => parse_relative_millis(text).unwrap_or(0),
        Some(TakeTimestamp::At(at)) => (now - *at).num_milliseconds(),
        Some(TakeTimestamp::EpochMillis(ms)) => now.timestamp_millis().saturating_sub(*ms),
    };
    millis.max(0) as f64 / MS_PER_HOUR
}
