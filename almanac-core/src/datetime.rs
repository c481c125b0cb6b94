//! Pure date and formatting helpers.
//!
//! These are the locale-independent rendering and day-bucket functions
//! shared by the month grid, the day schedule, and the event detail
//! summary. All of them are total over their inputs.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// The half-open day bucket for a date: `[midnight, midnight + 1 day)`.
///
/// An event belongs to a day iff its start falls inside these bounds, so
/// an event starting exactly at the next midnight is excluded.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let low = date.and_hms_opt(0, 0, 0).unwrap();
    (low, low + Duration::days(1))
}

/// Format the date portion as `dd-MMM-yyyy` (e.g. "01-Mar-2024").
///
/// Returns an empty string for `None`.
pub fn format_date(dt: Option<NaiveDateTime>) -> String {
    match dt {
        Some(dt) => dt.format("%d-%b-%Y").to_string(),
        None => String::new(),
    }
}

/// Format the time portion as 24-hour `HH:mm` (e.g. "09:00").
///
/// Returns an empty string for `None`.
pub fn format_time(dt: Option<NaiveDateTime>) -> String {
    match dt {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// Two-letter weekday abbreviation, Sunday first.
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

// =============================================================================
// Tests
// =============================================================================
