//! Display formatting for backend timestamps.
//!
//! Absent or unparseable input renders as `-`.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const PLACEHOLDER: &str = "-";

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Parse an RFC 3339 timestamp, or a zone-less one interpreted in `tz`.
fn parse_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(tz));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(input, format)
            .ok()
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
    })
}

/// `YYYY-MM-DD HH:mm` in local time.
pub fn format_date_time(input: Option<&str>) -> String {
    format_date_time_in(input, &Local)
}

pub fn format_date_time_in<Tz>(input: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    input
        .and_then(|raw| parse_in(raw, tz))
        .map(|date| date.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `YYYY-MM-DD` in local time.
pub fn format_date(input: Option<&str>) -> String {
    format_date_in(input, &Local)
}

pub fn format_date_in<Tz>(input: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    input
        .and_then(|raw| parse_in(raw, tz))
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Coarse age of `input` relative to `now`; a week or older shows the full date-time.
pub fn format_relative_time(input: Option<&str>, now: DateTime<Utc>) -> String {
    format_relative_time_in(input, now, &Local)
}

pub fn format_relative_time_in<Tz>(input: Option<&str>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(date) = input.and_then(|raw| parse_in(raw, tz)) else {
        return PLACEHOLDER.to_string();
    };

    let elapsed = now.signed_duration_since(date.with_timezone(&Utc));
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        date.format(DATE_TIME_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn shanghai() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn formats_in_the_given_zone() {
        let tz = shanghai();
        assert_eq!(
            format_date_time_in(Some("2024-03-09T20:05:00Z"), &tz),
            "2024-03-10 04:05"
        );
        assert_eq!(format_date_in(Some("2024-03-09T20:05:00Z"), &tz), "2024-03-10");
        assert_eq!(
            format_date_time_in(Some("2024-03-09 20:05:00"), &tz),
            "2024-03-09 20:05"
        );
    }

    #[test]
    fn missing_or_invalid_input_renders_placeholder() {
        let tz = Utc;
        assert_eq!(format_date_time_in(None, &tz), PLACEHOLDER);
        assert_eq!(format_date_time_in(Some(""), &tz), PLACEHOLDER);
        assert_eq!(format_date_in(Some("yesterday"), &tz), PLACEHOLDER);
        assert_eq!(format_relative_time_in(Some("soon"), now(), &tz), PLACEHOLDER);
    }

    #[test]
    fn relative_time_buckets() {
        let tz = Utc;
        let cases = [
            ("2024-03-10T11:59:30Z", "just now"),
            ("2024-03-10T11:15:00Z", "45 minutes ago"),
            ("2024-03-10T07:00:00Z", "5 hours ago"),
            ("2024-03-07T12:00:00Z", "3 days ago"),
            ("2024-02-01T08:30:00Z", "2024-02-01 08:30"),
        ];
        for (input, expected) in cases {
            assert_eq!(format_relative_time_in(Some(input), now(), &tz), expected);
        }
    }
}
