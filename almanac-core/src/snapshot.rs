//! Snapshot persistence for the event collection.
//!
//! The snapshot is an explicit, versioned line-record format: a JSON
//! header line followed by one JSON record per event, in ascending start
//! order. Loading a file written by a different (newer) version fails
//! cleanly instead of misreading it.
//!
//! An absent file is not an error (first launch starts empty); a corrupt
//! file is, so a damaged snapshot is never silently overwritten.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{AlmanacError, AlmanacResult};
use crate::event::Event;

const SNAPSHOT_FORMAT: &str = "almanac";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
    format: String,
    version: u32,
}

/// The on-disk shape of one event. Kept separate from [`Event`] so the
/// wire format never couples to the in-memory type: records go through
/// [`Event::new`] on load, which re-validates them.
#[derive(Serialize, Deserialize)]
struct Record {
    start: NaiveDateTime,
    end: NaiveDateTime,
    title: String,
}

/// Load all events from a snapshot file.
///
/// An absent file yields an empty collection. A file that exists but
/// cannot be parsed (bad header, unsupported version, malformed or
/// invalid record) yields [`AlmanacError::Snapshot`] naming the problem.
pub fn load_snapshot(path: &Path) -> AlmanacResult<Vec<Event>> {
    if !path.exists() {
        info!("no snapshot at {}, starting empty", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| AlmanacError::Snapshot(format!("{}: empty file", path.display())))?;
    let header: Header = serde_json::from_str(header_line)
        .map_err(|e| AlmanacError::Snapshot(format!("{}: bad header: {}", path.display(), e)))?;
    if header.format != SNAPSHOT_FORMAT {
        return Err(AlmanacError::Snapshot(format!(
            "{}: unknown format '{}'",
            path.display(),
            header.format
        )));
    }
    if header.version != SNAPSHOT_VERSION {
        return Err(AlmanacError::Snapshot(format!(
            "{}: unsupported version {} (expected {})",
            path.display(),
            header.version,
            SNAPSHOT_VERSION
        )));
    }

    let mut events = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line).map_err(|e| {
            AlmanacError::Snapshot(format!("{}: line {}: {}", path.display(), idx + 1, e))
        })?;
        let event = Event::new(record.start, record.end, record.title).map_err(|e| {
            AlmanacError::Snapshot(format!("{}: line {}: {}", path.display(), idx + 1, e))
        })?;
        events.push(event);
    }

    info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Write all events to the snapshot file, overwriting it wholesale.
pub fn save_snapshot<'a>(
    path: &Path,
    events: impl IntoIterator<Item = &'a Event>,
) -> AlmanacResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let header = Header {
        format: SNAPSHOT_FORMAT.to_string(),
        version: SNAPSHOT_VERSION,
    };
    let mut out = serde_json::to_string(&header)
        .map_err(|e| AlmanacError::Snapshot(format!("header: {}", e)))?;
    out.push('\n');

    let mut count = 0usize;
    for event in events {
        let record = Record {
            start: event.start(),
            end: event.end(),
            title: event.title().to_string(),
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| AlmanacError::Snapshot(format!("record '{}': {}", event.title(), e)))?;
        out.push_str(&line);
        out.push('\n');
        count += 1;
    }

    fs::write(path, out)?;
    info!("saved {} events to {}", count, path.display());
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
