//! Terminal rendering for the month grid and the day schedule.
//!
//! The grid marks the selected day with brackets and days that have
//! events with a `*`; color is layered on top (cyan for today, green
//! for event days) so the layout survives a colorless terminal.

use almanac_core::datetime::{format_date, format_time, weekday_abbrev};
use almanac_core::{Event, EventStore};
use chrono::{Datelike, Duration, Local, NaiveDate};
use owo_colors::OwoColorize;

/// The full view: month grid above, selected day's schedule below.
pub fn render_view(store: &EventStore) -> String {
    format!("{}\n{}", month_grid(store), schedule(store))
}

/// Render the month grid around the store's cursor.
pub fn month_grid(store: &EventStore) -> String {
    let cursor = store.selected_date();
    let today = Local::now().date_naive();
    let first = cursor.with_day(1).unwrap_or(cursor);
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut lines = Vec::new();
    let title = cursor.format("%B %Y").to_string();
    lines.push(format!("{:^28}", title).bold().to_string());
    lines.push(weekday_header(first));

    let mut row: Vec<String> = vec!["    ".to_string(); offset];
    for day in 1..=days_in_month(cursor.year(), cursor.month()) {
        let date = cursor.with_day(day).unwrap_or(cursor);
        let has_events = store.has_events_on(date);
        let cell = day_cell(day, date == cursor, has_events);

        let colored = if date == today {
            cell.cyan().bold().to_string()
        } else if has_events {
            cell.green().to_string()
        } else {
            cell
        };
        row.push(colored);

        if row.len() == 7 {
            lines.push(row.join(""));
            row.clear();
        }
    }
    if !row.is_empty() {
        lines.push(row.join(""));
    }

    lines.join("\n")
}

/// Render the selected day's schedule, one numbered line per event.
pub fn schedule(store: &EventStore) -> String {
    let date = store.selected_date();
    let noon = date.and_hms_opt(12, 0, 0);

    let mut lines = Vec::new();
    lines.push(
        format!("{} {}", date.format("%A"), format_date(noon))
            .bold()
            .to_string(),
    );

    let events = store.events_on(date);
    if events.is_empty() {
        lines.push("   No events".dimmed().to_string());
    } else {
        for (i, event) in events.iter().enumerate() {
            lines.push(schedule_entry(i + 1, event));
        }
    }

    lines.join("\n")
}

/// One schedule line: `  1. 09:00-10:00  Standup`.
fn schedule_entry(index: usize, event: &Event) -> String {
    format!(
        "{:>3}. {}-{}  {}",
        index,
        format_time(Some(event.start())),
        format_time(Some(event.end())),
        event.title()
    )
}

/// The `SU MO TU WE TH FR SA` header row, built from the abbreviation
/// helper over a real Sunday-to-Saturday week.
fn weekday_header(any_day: NaiveDate) -> String {
    let sunday = any_day - Duration::days(any_day.weekday().num_days_from_sunday() as i64);
    (0..7)
        .map(|i| format!(" {} ", weekday_abbrev(sunday + Duration::days(i))))
        .collect::<Vec<_>>()
        .join("")
        .dimmed()
        .to_string()
}

/// A fixed-width (4 column) day cell. Brackets mark the selected day;
/// a trailing `*` marks a day with events.
fn day_cell(day: u32, selected: bool, has_events: bool) -> String {
    if selected {
        format!("[{:>2}]", day)
    } else if has_events {
        format!(" {:>2}*", day)
    } else {
        format!(" {:>2} ", day)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

// =============================================================================
// Tests
// =============================================================================
