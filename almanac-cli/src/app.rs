//! Application state: the event store plus its on-disk backing.
//!
//! The CLI hydrates the store from the data directory at startup, runs
//! one command against it, and writes everything back on the way out —
//! but only if a store mutation actually fired the change observer.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use almanac_core::{snapshot, EventStore};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const EVENTS_FILE: &str = "events.jsonl";
const STATE_FILE: &str = "state.toml";

/// The small cursor-state file, kept separate from the event snapshot.
#[derive(Serialize, Deserialize)]
struct AppState {
    selected_date: NaiveDate,
}

pub struct App {
    dir: PathBuf,
    pub store: EventStore,
    dirty: Rc<Cell<bool>>,
}

impl App {
    /// Hydrate the store from the data directory.
    ///
    /// A missing directory, snapshot, or state file just means a fresh
    /// start; a snapshot that exists but cannot be parsed is a hard
    /// error so we never clobber it on save.
    pub fn load(dir: Option<PathBuf>) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let events = snapshot::load_snapshot(&dir.join(EVENTS_FILE))
            .with_context(|| format!("Failed to load events from {}", dir.display()))?;

        let mut store = EventStore::new();
        store.hydrate(events);
        if let Some(state) = read_state(&dir.join(STATE_FILE)) {
            store.set_selected_date(state.selected_date);
        }

        // Attached after hydration so only user-driven mutations mark
        // the store dirty.
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        store.attach_observer(Box::new(move || flag.set(true)));

        Ok(App { dir, store, dirty })
    }

    /// Write the snapshot and cursor state back if anything changed.
    pub fn save_if_changed(&self) -> Result<()> {
        if !self.dirty.get() {
            return Ok(());
        }

        let events: Vec<_> = self.store.events().cloned().collect();
        snapshot::save_snapshot(&self.dir.join(EVENTS_FILE), &events)
            .with_context(|| format!("Failed to save events to {}", self.dir.display()))?;

        let state = AppState {
            selected_date: self.store.selected_date(),
        };
        let rendered = toml::to_string(&state).context("Failed to serialize state")?;
        fs::write(self.dir.join(STATE_FILE), rendered)
            .with_context(|| format!("Failed to save state to {}", self.dir.display()))?;

        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data_dir.join("almanac"))
}

/// Read the cursor state, tolerating absence and corruption: the cursor
/// is a UI convenience, so a bad state file falls back to today.
fn read_state(path: &Path) -> Option<AppState> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("ignoring corrupt state file {}: {}", path.display(), e);
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::Event;
    use chrono::NaiveDateTime;
    use tempfile::tempdir;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_fresh_directory_starts_empty_and_saves_nothing() {
        let dir = tempdir().unwrap();
        let app = App::load(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(app.store.events().count(), 0);
        app.save_if_changed().unwrap();
        assert!(!dir.path().join(EVENTS_FILE).exists());
    }

    #[test]
    fn test_mutations_persist_across_loads() {
        let dir = tempdir().unwrap();

        let mut app = App::load(Some(dir.path().to_path_buf())).unwrap();
        let event = Event::new(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup").unwrap();
        app.store.add_event(event.clone()).unwrap();
        app.store
            .set_selected_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        app.save_if_changed().unwrap();

        let reloaded = App::load(Some(dir.path().to_path_buf())).unwrap();
        let events: Vec<_> = reloaded.store.events().cloned().collect();
        assert_eq!(events, vec![event]);
        assert_eq!(
            reloaded.store.selected_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_corrupt_state_file_falls_back_to_today() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not = valid = toml").unwrap();

        let app = App::load(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(app.store.selected_date(), chrono::Local::now().date_naive());
    }

    #[test]
    fn test_corrupt_snapshot_refuses_to_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EVENTS_FILE), "garbage\n").unwrap();

        assert!(App::load(Some(dir.path().to_path_buf())).is_err());
    }
}
