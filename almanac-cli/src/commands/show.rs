use anyhow::Result;
use chrono::NaiveDate;

use crate::app::App;
use crate::render;

/// Render the month grid and the selected day's schedule, optionally
/// moving the cursor first.
pub fn run(app: &mut App, date: Option<NaiveDate>) -> Result<()> {
    if let Some(date) = date {
        app.store.set_selected_date(date);
    }
    println!("{}", render::render_view(&app.store));
    Ok(())
}
