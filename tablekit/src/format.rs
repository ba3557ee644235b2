//! Datetime cell formatting.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use log::warn;

/// Placeholder rendered for missing or invalid values.
pub const PLACEHOLDER: &str = "—";

/// Relative labels stop after this many days and switch to a calendar date.
const RELATIVE_DAYS: i64 = 7;

/// Accepted timestamp inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    /// RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD`.
    Text(&'a str),
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// An instant.
    Instant(DateTime<Utc>),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(value)
    }
}

impl From<i64> for DateInput<'_> {
    fn from(value: i64) -> Self {
        DateInput::Millis(value)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

/// A formatted timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDateTime {
    /// Recency-aware label, e.g. "5 minutes ago".
    pub formatted: String,
    /// ISO-8601 instant in UTC.
    pub raw: String,
}

/// Parse any accepted input into an instant.
pub fn parse_timestamp(input: DateInput<'_>) -> Option<DateTime<Utc>> {
    match input {
        DateInput::Instant(dt) => Some(dt),
        DateInput::Millis(ms) => DateTime::from_timestamp_millis(ms),
        DateInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.with_timezone(&Utc));
            }
            for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
                    return Some(naive.and_utc());
                }
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
    }
}

/// Resolve a locale name such as `en_US`, falling back to `en_US`.
pub fn resolve_locale(name: &str) -> Locale {
    match Locale::try_from(name) {
        Ok(locale) => locale,
        Err(_) => {
            warn!("Unknown locale '{}', using en_US", name);
            Locale::en_US
        }
    }
}

/// Format a timestamp relative to `now`.
///
/// Returns `None` for empty or unparseable input.
pub fn format_date_time<'a>(
    input: impl Into<DateInput<'a>>,
    now: DateTime<Utc>,
    locale: Locale,
) -> Option<FormattedDateTime> {
    let instant = parse_timestamp(input.into())?;
    Some(FormattedDateTime {
        formatted: relative_label(instant, now, locale),
        raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn relative_label(instant: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let elapsed = now.signed_duration_since(instant);

    if elapsed < TimeDelta::zero() {
        // Clock skew of under a minute still reads as "now".
        if elapsed > -TimeDelta::minutes(1) {
            return "Just now".to_string();
        }
        return calendar_date(instant, locale);
    }

    if elapsed < TimeDelta::minutes(1) {
        return "Just now".to_string();
    }
    if elapsed < TimeDelta::hours(1) {
        return plural(elapsed.num_minutes(), "minute");
    }
    if elapsed < TimeDelta::days(1) {
        return plural(elapsed.num_hours(), "hour");
    }
    if elapsed.num_days() <= RELATIVE_DAYS {
        return plural(elapsed.num_days(), "day");
    }
    calendar_date(instant, locale)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

fn calendar_date(instant: DateTime<Utc>, locale: Locale) -> String {
    instant.format_localized("%b %-d, %Y", locale).to_string()
}
