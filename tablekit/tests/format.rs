//! Tests for datetime formatting.

use chrono::{DateTime, Locale, TimeDelta, TimeZone, Utc};

use tablekit::format::{DateInput, format_date_time, parse_timestamp, resolve_locale};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn label(instant: DateTime<Utc>) -> String {
    format_date_time(instant, now(), Locale::en_US)
        .expect("valid instant")
        .formatted
}

#[test]
fn test_thirty_seconds_is_just_now() {
    assert_eq!(label(now() - TimeDelta::seconds(30)), "Just now");
}

#[test]
fn test_two_days_ago() {
    assert_eq!(label(now() - TimeDelta::days(2)), "2 days ago");
}

#[test]
fn test_relative_buckets() {
    assert_eq!(label(now() - TimeDelta::minutes(5)), "5 minutes ago");
    assert_eq!(label(now() - TimeDelta::hours(1)), "1 hour ago");
    assert_eq!(label(now() - TimeDelta::hours(23)), "23 hours ago");
    assert_eq!(label(now() - TimeDelta::days(1)), "1 day ago");
    assert_eq!(label(now() - TimeDelta::days(7)), "7 days ago");
}

#[test]
fn test_older_dates_use_calendar_form() {
    assert_eq!(label(now() - TimeDelta::days(30)), "May 16, 2024");
}

#[test]
fn test_future_instants() {
    assert_eq!(label(now() + TimeDelta::seconds(20)), "Just now");
    assert_eq!(label(now() + TimeDelta::days(3)), "Jun 18, 2024");
}

#[test]
fn test_invalid_input_is_none() {
    assert!(format_date_time("not a date", now(), Locale::en_US).is_none());
    assert!(format_date_time("", now(), Locale::en_US).is_none());
    assert!(format_date_time("2024-13-45", now(), Locale::en_US).is_none());
}

#[test]
fn test_raw_is_utc_iso() {
    let formatted = format_date_time("2024-06-15T14:00:00+02:00", now(), Locale::en_US)
        .expect("valid");
    assert_eq!(formatted.raw, "2024-06-15T12:00:00.000Z");
    assert_eq!(formatted.formatted, "Just now");
}

#[test]
fn test_millis_input() {
    let millis = (now() - TimeDelta::minutes(10)).timestamp_millis();
    assert_eq!(
        parse_timestamp(DateInput::Millis(millis)),
        Some(now() - TimeDelta::minutes(10))
    );
    assert_eq!(
        format_date_time(millis, now(), Locale::en_US).map(|f| f.formatted),
        Some("10 minutes ago".to_string())
    );
}

#[test]
fn test_unknown_locale_falls_back() {
    assert_eq!(resolve_locale("xx_YY"), Locale::en_US);
    assert_eq!(resolve_locale("de_DE"), Locale::de_DE);
}
