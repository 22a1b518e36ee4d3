use chrono::{DateTime, NaiveDateTime, Utc};

/// Minutes from `now` until `close_time`, floored at zero.
/// Accepts RFC3339 or a bare `%Y-%m-%dT%H:%M:%SZ` timestamp.
pub fn remaining_minutes(close_time: &str, now: DateTime<Utc>) -> Option<f64> {
    let close = DateTime::parse_from_rfc3339(close_time)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(close_time, "%Y-%m-%dT%H:%M:%SZ")
                .ok()
                .map(|dt| dt.and_utc())
        })?;

    let secs = (close - now).num_milliseconds() as f64 / 1000.0;
    Some((secs / 60.0).max(0.0))
}
