//! Cursor navigation: today, goto, next/prev.

use almanac_core::store::DateUnit;
use anyhow::Result;
use chrono::NaiveDate;

use crate::app::App;
use crate::render;

/// Move the cursor to the current date and re-render.
pub fn today(app: &mut App) -> Result<()> {
    app.store.go_to_today();
    println!("{}", render::render_view(&app.store));
    Ok(())
}

/// Move the cursor to a specific date and re-render.
pub fn goto(app: &mut App, date: NaiveDate) -> Result<()> {
    app.store.set_selected_date(date);
    println!("{}", render::render_view(&app.store));
    Ok(())
}

/// Move the cursor by a signed number of units and re-render.
pub fn shift(app: &mut App, unit: DateUnit, delta: i32) -> Result<()> {
    app.store.advance_selected(unit, delta);
    println!("{}", render::render_view(&app.store));
    Ok(())
}
