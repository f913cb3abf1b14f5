//! Turnaround-time computation over service timestamps.
//!
//! All functions here are pure; the aggregators feed them fields taken from
//! already-fetched items. The service reports UTC instants in Z-suffixed
//! ISO-8601 form (`2023-05-01T12:34:56Z`).

use chrono::{DateTime, Utc};

/// Parses one of the service's timestamps into a UTC instant.
///
/// Absent, empty, or unparseable input yields `None`, never an error:
/// items with bad timestamps are simply excluded from averaging.
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Whole-day turnaround between creation and close.
///
/// Defined only when both endpoints are present and parse; sub-day
/// precision is discarded.
pub fn resolution_days(created_at: Option<&str>, closed_at: Option<&str>) -> Option<i64> {
    let created = parse_timestamp(created_at)?;
    let closed = parse_timestamp(closed_at)?;
    Some((closed - created).num_days())
}

/// Mean of the collected turnaround times, rounded to one decimal place.
///
/// An empty set averages to 0.0 by policy; there is nothing to divide by
/// and "no resolved items" should read as zero days, not a crash.
pub fn average_days(intervals: &[i64]) -> f64 {
    if intervals.is_empty() {
        return 0.0;
    }
    let total: i64 = intervals.iter().sum();
    let mean = total as f64 / intervals.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_z_suffixed_timestamp_round_trips() {
        let parsed = parse_timestamp(Some("2023-05-01T12:34:56Z")).unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2023, 5, 1, 12, 34, 56).unwrap()
        );
        // Formatting back with an explicit offset reproduces the instant.
        assert_eq!(parsed.to_rfc3339(), "2023-05-01T12:34:56+00:00");
    }

    #[test]
    fn test_parse_empty_or_absent_yields_none() {
        assert_eq!(parse_timestamp(None), None);
        assert_eq!(parse_timestamp(Some("")), None);
        assert_eq!(parse_timestamp(Some("   ")), None);
        assert_eq!(parse_timestamp(Some("not a date")), None);
    }

    #[test]
    fn test_resolution_days_floors_to_whole_days() {
        let days = resolution_days(
            Some("2023-05-01T12:00:00Z"),
            Some("2023-05-04T11:59:59Z"),
        );
        assert_eq!(days, Some(2));

        let days = resolution_days(
            Some("2023-05-01T12:00:00Z"),
            Some("2023-05-04T12:00:00Z"),
        );
        assert_eq!(days, Some(3));
    }

    #[test]
    fn test_resolution_days_requires_both_endpoints() {
        assert_eq!(resolution_days(Some("2023-05-01T12:00:00Z"), None), None);
        assert_eq!(resolution_days(None, Some("2023-05-01T12:00:00Z")), None);
        assert_eq!(resolution_days(None, None), None);
    }

    #[test]
    fn test_average_of_three_and_five_is_four() {
        assert_eq!(average_days(&[3, 5]), 4.0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        assert_eq!(average_days(&[1, 2]), 1.5);
        assert_eq!(average_days(&[1, 1, 2]), 1.3);
    }

    #[test]
    fn test_average_of_empty_set_is_zero() {
        assert_eq!(average_days(&[]), 0.0);
    }
}
