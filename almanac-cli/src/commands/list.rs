use almanac_core::datetime::{format_date, format_time};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;

/// List every stored event, one line each, ascending by start time.
pub fn run(app: &App) -> Result<()> {
    let mut count = 0usize;
    for (i, event) in app.store.events().enumerate() {
        println!(
            "{:>3}. {} {}-{}  {}",
            i + 1,
            format_date(Some(event.start())),
            format_time(Some(event.start())),
            format_time(Some(event.end())),
            event.title()
        );
        count = i + 1;
    }

    if count == 0 {
        println!("{}", "No events".dimmed());
    }
    Ok(())
}
