//! The calendar event value type.
//!
//! An `Event` is a titled time interval at minute precision. Construction
//! goes through [`Event::new`], which rejects blank titles and intervals
//! that do not end after they start, so an invalid `Event` cannot exist.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

use crate::datetime::{format_date, format_time};
use crate::error::{AlmanacError, AlmanacResult};

/// A titled time interval on the calendar.
///
/// Events have no identity beyond their `(start, end, title)` values:
/// equality is full-value equality, and ordering is by start time,
/// tie-broken by end time and then title so it stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Event {
    start: NaiveDateTime,
    end: NaiveDateTime,
    title: String,
}

impl Event {
    /// Create a new event, normalizing both timestamps to minute precision.
    ///
    /// Fails with [`AlmanacError::InvalidEvent`] if the title is blank or
    /// the end does not fall strictly after the start (compared after
    /// normalization, so a same-minute interval is rejected too).
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: impl Into<String>,
    ) -> AlmanacResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AlmanacError::InvalidEvent("title must not be blank".into()));
        }

        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if end <= start {
            return Err(AlmanacError::InvalidEvent(format!(
                "end ({}) must be after start ({})",
                end, start
            )));
        }

        Ok(Event { start, end, title })
    }

    /// Start of the event, minute precision.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// End of the event, minute precision.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// The event's title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// The multi-line detail summary shown for a single event.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TITLE: {}", self.title)?;
        writeln!(f, "DATE: {}", format_date(Some(self.start)))?;
        writeln!(f, "START: {}", format_time(Some(self.start)))?;
        writeln!(f, "END: {}", format_time(Some(self.end)))
    }
}

/// Zero out seconds and sub-second components.
fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(dt)
}

// =============================================================================
// Tests
// =============================================================================
