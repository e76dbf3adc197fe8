use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z, the reference
/// date of `...AsTimerInterval` fields.
pub const APPLE_EPOCH_OFFSET: i64 = 978_307_200;

/// Convert a timer interval relative to the Apple reference date into a UTC
/// timestamp. Returns `None` for non-finite or unrepresentable values.
pub fn apple_time(interval: f64) -> Option<DateTime<Utc>> {
    if !interval.is_finite() {
        return None;
    }
    let whole = interval.floor();
    let nanos = ((interval - whole) * 1e9).round().min(999_999_999.0) as u32;
    let secs = (whole as i64).checked_add(APPLE_EPOCH_OFFSET)?;
    DateTime::from_timestamp(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn zero_is_reference_date() {
        let t = apple_time(0.0).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2001, 1, 1));
        assert_eq!(t.timestamp(), APPLE_EPOCH_OFFSET);
    }

    #[test]
    fn fractional_and_negative_intervals() {
        let t = apple_time(86_400.5).unwrap();
        assert_eq!(t.day(), 2);
        assert_eq!(t.nanosecond(), 500_000_000);

        let before = apple_time(-1.0).unwrap();
        assert_eq!(before.year(), 2000);
        assert_eq!((before.hour(), before.minute(), before.second()), (23, 59, 59));
    }

    #[test]
    fn non_finite_is_none() {
        assert!(apple_time(f64::NAN).is_none());
        assert!(apple_time(f64::INFINITY).is_none());
    }
}
