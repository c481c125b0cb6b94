use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::app::App;

/// Delete the Nth event (1-based, schedule order) of a day's schedule,
/// after showing its detail block and confirming.
pub fn run(app: &mut App, index: usize, date: Option<NaiveDate>, yes: bool) -> Result<()> {
    let date = date.unwrap_or_else(|| app.store.selected_date());
    let events = app.store.events_on(date);

    if events.is_empty() {
        anyhow::bail!("No events on {}", date);
    }
    let event = events
        .get(index.wrapping_sub(1))
        .ok_or_else(|| anyhow::anyhow!("No event #{} on {} ({} scheduled)", index, date, events.len()))?;

    print!("{}", event);
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this event?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Kept.".dimmed());
            return Ok(());
        }
    }

    // The event came out of the store moments ago, so removal must succeed.
    let removed = app.store.delete_event(event);
    debug_assert!(removed);
    println!("{}", format!("Deleted: {}", event.title()).green());
    Ok(())
}
