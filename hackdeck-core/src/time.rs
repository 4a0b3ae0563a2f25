//! Duration and date-range formatting.

use chrono::{DateTime, Local, TimeZone, Utc};

const MS_PER_MINUTE: i64 = 60 * 1000;

/// Whole minutes between two millisecond timestamps, halves rounding up.
///
/// An end before the start yields a negative duration; it is not clamped.
pub fn duration_minutes(start_ms: i64, end_ms: i64) -> i64 {
    (end_ms - start_ms + MS_PER_MINUTE / 2).div_euclid(MS_PER_MINUTE)
}

/// Format a duration for display: "45 min", "2h", "1h 30m"
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// Convert a millisecond timestamp to a datetime in the given zone.
pub fn at<Tz: TimeZone>(ms: i64, tz: &Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .with_timezone(tz)
}

/// Format an event's time span in local time.
///
/// Same day: "Jan 12, 2021 · 2:00 PM – 2:30 PM"
/// Otherwise: "Jan 12, 2021 2:00 PM – Jan 13, 2021 2:30 PM"
pub fn format_date_range(start_ms: i64, end_ms: i64) -> String {
    format_date_range_in(start_ms, end_ms, &Local)
}

/// Like [`format_date_range`], in an explicit time zone.
pub fn format_date_range_in<Tz: TimeZone>(start_ms: i64, end_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let start = at(start_ms, tz);
    let end = at(end_ms, tz);

    if start.date_naive() == end.date_naive() {
        return format!(
            "{} \u{00B7} {} \u{2013} {}",
            start.format("%b %-d, %Y"),
            start.format("%-I:%M %p"),
            end.format("%-I:%M %p"),
        );
    }

    format!(
        "{} \u{2013} {}",
        start.format("%b %-d, %Y %-I:%M %p"),
        end.format("%b %-d, %Y %-I:%M %p"),
    )
}
