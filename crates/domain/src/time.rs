//! Time helpers for change records and energy sessions.

use chrono::{DateTime, Utc};

/// UTC timestamp used for change records and energy-session bookkeeping.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Elapsed time between two timestamps, in fractional hours.
///
/// Negative when `end` precedes `start`; energy accounting only ever
/// calls this with `end >= start`.
#[must_use]
pub fn hours_between(start: Timestamp, end: Timestamp) -> f64 {
    let millis = (end - start).num_milliseconds();
    millis_to_hours(millis)
}

#[allow(clippy::cast_precision_loss)]
fn millis_to_hours(millis: i64) -> f64 {
    millis as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_convert_elapsed_millis_to_hours() {
        let start = now();
        let end = start + TimeDelta::minutes(90);
        let hours = hours_between(start, end);
        assert!((hours - 1.5).abs() < 1e-9);
    }

    #[test]
    fn should_return_zero_hours_for_equal_timestamps() {
        let ts = now();
        assert!(hours_between(ts, ts).abs() < 1e-9);
    }
}
