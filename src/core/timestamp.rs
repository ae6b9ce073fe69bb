use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// `20240305T143022`: no separators, safe inside file names.
pub const BASIC_FORMAT: &str = "%Y%m%dT%H%M%S";

/// `2024-03-05T14:30:22`
pub const EXTENDED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render the current local wall-clock time.
///
/// The clock is read on every call. Sub-second precision is dropped, so
/// successive calls never go backwards while the clock moves forward.
pub fn format_timestamp(extended: bool) -> String {
    format_at(&Local::now(), extended)
}

/// Render a given instant in one of the two fixed layouts.
pub fn format_at<Tz>(at: &DateTime<Tz>, extended: bool) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(layout(extended)).to_string()
}

/// [`format_at`] for a time with no zone attached.
pub fn format_naive(at: &NaiveDateTime, extended: bool) -> String {
    at.format(layout(extended)).to_string()
}

fn layout(extended: bool) -> &'static str {
    if extended {
        EXTENDED_FORMAT
    } else {
        BASIC_FORMAT
    }
}
