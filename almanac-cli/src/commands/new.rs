use almanac_core::Event;
use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use owo_colors::OwoColorize;

use crate::app::App;

/// Create a new timed event on the calendar.
///
/// The date defaults to the cursor date, the end to start + 1 hour.
/// Validation and conflict failures are recoverable: the store is left
/// unchanged and the reason is printed for the user.
pub fn run(
    app: &mut App,
    title: String,
    start: String,
    end: Option<String>,
    duration: Option<String>,
) -> Result<()> {
    let start_time = parse_datetime(&start, app.store.selected_date())?;

    let end_time = if let Some(end_input) = end {
        // A bare time on the end refers to the start's date.
        parse_datetime(&end_input, start_time.date())?
    } else if let Some(dur_input) = duration {
        start_time
            .checked_add_signed(parse_duration(&dur_input)?)
            .ok_or_else(|| anyhow!("Duration too large"))?
    } else {
        start_time + Duration::hours(1)
    };

    let event = Event::new(start_time, end_time, title).map_err(|e| anyhow!("{}", e))?;

    if let Some(existing) = app.store.conflicting_event(&event) {
        eprintln!("{}", "Conflicts with an existing event:".red());
        eprint!("{}", existing);
        anyhow::bail!("Event not added");
    }

    let created = event.clone();
    app.store
        .add_event(event)
        .map_err(|e| anyhow!("{}", e))?;
    app.store.set_selected_date(created.start().date());

    println!("{}", format!("Created: {}", created.title()).green());
    Ok(())
}

/// Parse "YYYY-MM-DD HH:MM" (or with a 'T' separator), or a bare
/// "HH:MM" interpreted on the given default date.
fn parse_datetime(input: &str, default_date: NaiveDate) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
        return Ok(default_date.and_time(time));
    }

    anyhow::bail!(
        "Could not parse date/time \"{}\". Expected \"YYYY-MM-DD HH:MM\" or \"HH:MM\"",
        input
    )
}

/// Parse a human duration ("45m", "1h 30m") into a chrono duration.
fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input)
        .map_err(|e| anyhow!("Could not parse duration \"{}\": {}", input, e))?;
    Duration::from_std(std_dur).context("Duration too large")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_full_datetime() {
        let dt = parse_datetime("2024-03-01 09:00", date(2000, 1, 1)).unwrap();
        assert_eq!(dt, date(2024, 3, 1).and_hms_opt(9, 0, 0).unwrap());

        let dt = parse_datetime("2024-03-01T09:00", date(2000, 1, 1)).unwrap();
        assert_eq!(dt, date(2024, 3, 1).and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_bare_time_uses_default_date() {
        let dt = parse_datetime("14:30", date(2024, 3, 1)).unwrap();
        assert_eq!(dt, date(2024, 3, 1).and_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_unparseable_input() {
        assert!(parse_datetime("next tuesday", date(2024, 3, 1)).is_err());
    }

    #[test]
    fn test_parses_human_durations() {
        assert_eq!(parse_duration("45m").unwrap(), Duration::minutes(45));
        assert_eq!(parse_duration("1h 30m").unwrap(), Duration::minutes(90));
        assert!(parse_duration("soon").is_err());
    }
}
