//! The event store: the canonical sorted event collection plus the
//! cursor date the UI is currently focused on.
//!
//! All mutating operations notify attached observers synchronously, in
//! attachment order, after the mutation is fully applied. The store is
//! single-threaded by design; callers that add concurrency must serialize
//! mutations themselves.

use std::collections::BTreeSet;

use chrono::{Duration, Months, NaiveDate};

use crate::clock::{Clock, SystemClock};
use crate::datetime::day_bounds;
use crate::error::{AlmanacError, AlmanacResult};
use crate::event::Event;

/// Calendar unit for cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Day,
    Month,
    Year,
}

/// Receives a change notification after every store mutation.
pub trait ChangeObserver {
    fn on_change(&self);
}

/// Plain closures can be used as observers.
impl<F: Fn()> ChangeObserver for F {
    fn on_change(&self) {
        self()
    }
}

/// Owns the event collection and the selected (cursor) date.
pub struct EventStore {
    selected_date: NaiveDate,
    events: BTreeSet<Event>,
    observers: Vec<Box<dyn ChangeObserver>>,
    clock: Box<dyn Clock>,
}

impl EventStore {
    /// An empty store cursored on today (system clock).
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// An empty store using the given clock for "today".
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        EventStore {
            selected_date: today,
            events: BTreeSet::new(),
            observers: Vec::new(),
            clock,
        }
    }

    /// Bulk-load events from a snapshot the store itself wrote.
    ///
    /// Trusted input: no conflict re-check is performed, since a snapshot
    /// produced by `add_event` cannot contain conflicting events.
    pub fn hydrate(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
        self.notify();
    }

    /// The current cursor date.
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Move the cursor to an arbitrary date. Any well-formed calendar
    /// date is accepted, past or future.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.notify();
    }

    /// Move the cursor by `delta` units, with calendar-correct rollover.
    ///
    /// Month and year arithmetic clamp to the last valid day of the
    /// target month (2024-01-31 + 1 month = 2024-02-29). If the
    /// arithmetic would leave chrono's representable range, the cursor
    /// stays where it is.
    pub fn advance_selected(&mut self, unit: DateUnit, delta: i32) {
        let moved = match unit {
            DateUnit::Day => self
                .selected_date
                .checked_add_signed(Duration::days(i64::from(delta))),
            DateUnit::Month => shift_months(self.selected_date, delta),
            DateUnit::Year => delta
                .checked_mul(12)
                .and_then(|months| shift_months(self.selected_date, months)),
        };
        self.selected_date = moved.unwrap_or(self.selected_date);
        self.notify();
    }

    /// Move the cursor to the current date.
    pub fn go_to_today(&mut self) {
        self.selected_date = self.clock.today();
        self.notify();
    }

    /// All events whose start falls within the half-open day bucket
    /// `[midnight(date), midnight(date) + 1 day)`, ascending by start.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        let (low, high) = day_bounds(date);
        self.events
            .iter()
            .skip_while(|e| e.start() < low)
            .take_while(|e| e.start() < high)
            .cloned()
            .collect()
    }

    /// Whether any event starts on the given date. Used by the month
    /// grid for highlight styling, so it avoids materializing the list.
    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        let (low, high) = day_bounds(date);
        self.events
            .iter()
            .find(|e| e.start() >= low)
            .is_some_and(|e| e.start() < high)
    }

    /// Every stored event, ascending by start time.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Insert an event, refusing it if it conflicts with a stored one.
    ///
    /// Conflict is an expected, recoverable outcome: on failure the
    /// collection is unchanged and no notification fires.
    pub fn add_event(&mut self, event: Event) -> AlmanacResult<()> {
        if let Some(existing) = self.conflicting_event(&event) {
            return Err(AlmanacError::Conflict(existing.title().to_string()));
        }
        self.events.insert(event);
        self.notify();
        Ok(())
    }

    /// Remove an event by value equality.
    ///
    /// Returns whether anything was removed. A no-op removal does not
    /// notify observers.
    pub fn delete_event(&mut self, event: &Event) -> bool {
        let removed = self.events.remove(event);
        if removed {
            self.notify();
        }
        removed
    }

    /// Whether the candidate's time span collides with any stored event.
    pub fn has_conflict(&self, candidate: &Event) -> bool {
        self.conflicting_event(candidate).is_some()
    }

    /// The first stored event the candidate collides with, if any.
    ///
    /// Two events conflict when they start on the same minute, or when
    /// the later-starting one begins strictly before the earlier one
    /// ends. An event starting exactly when another ends does not
    /// conflict (half-open interval semantics). O(n) scan.
    pub fn conflicting_event(&self, candidate: &Event) -> Option<&Event> {
        self.events.iter().find(|existing| {
            if candidate.start() == existing.start() {
                return true;
            }
            let (earliest, latest) = if candidate.start() < existing.start() {
                (candidate, *existing)
            } else {
                (*existing, candidate)
            };
            latest.start() < earliest.end()
        })
    }

    /// Register an observer. Observers are invoked synchronously after
    /// each mutation, in attachment order.
    pub fn attach_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer.on_change();
        }
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift a date by a signed number of months, clamping the day of month.
fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDateTime;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        date(y, mo, d).and_hms_opt(h, mi, 0).unwrap()
    }

    fn event(start: NaiveDateTime, end: NaiveDateTime, title: &str) -> Event {
        Event::new(start, end, title).unwrap()
    }

    fn store_on(d: NaiveDate) -> EventStore {
        EventStore::with_clock(Box::new(FixedClock(d)))
    }

    #[test]
    fn test_add_then_query_day_buckets() {
        let mut store = store_on(date(2024, 3, 1));
        let standup = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup");
        store.add_event(standup).unwrap();

        assert!(store.has_events_on(date(2024, 3, 1)));
        assert!(!store.has_events_on(date(2024, 3, 2)));
        assert_eq!(store.events_on(date(2024, 3, 1)).len(), 1);
    }

    #[test]
    fn test_same_start_minute_conflicts_both_ways() {
        let a = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "A");
        let b = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 9, 30), "B");

        let mut store = store_on(date(2024, 3, 1));
        store.add_event(a.clone()).unwrap();
        assert!(store.has_conflict(&b));

        let mut store = store_on(date(2024, 3, 1));
        store.add_event(b).unwrap();
        assert!(store.has_conflict(&a));
    }

    #[test]
    fn test_back_to_back_events_do_not_conflict() {
        let mut store = store_on(date(2024, 3, 1));
        store
            .add_event(event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "First"))
            .unwrap();
        store
            .add_event(event(
                dt(2024, 3, 1, 10, 0),
                dt(2024, 3, 1, 11, 0),
                "Back-to-back",
            ))
            .unwrap();
        assert_eq!(store.events_on(date(2024, 3, 1)).len(), 2);
    }

    #[test]
    fn test_overlap_conflicts_regardless_of_insertion_order() {
        let early = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 11, 0), "Early");
        let late = event(dt(2024, 3, 1, 10, 0), dt(2024, 3, 1, 12, 0), "Late");

        let mut store = store_on(date(2024, 3, 1));
        store.add_event(early.clone()).unwrap();
        assert!(store.has_conflict(&late));

        let mut store = store_on(date(2024, 3, 1));
        store.add_event(late).unwrap();
        assert!(store.has_conflict(&early));
    }

    #[test]
    fn test_conflicting_add_leaves_store_unchanged() {
        let mut store = store_on(date(2024, 3, 1));
        store
            .add_event(event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup"))
            .unwrap();

        let clash = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 9, 30), "Clash");
        let err = store.add_event(clash).unwrap_err();
        assert!(matches!(err, AlmanacError::Conflict(ref title) if title.as_str() == "Standup"));

        let remaining = store.events_on(date(2024, 3, 1));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title(), "Standup");
    }

    #[test]
    fn test_day_bucket_excludes_next_midnight() {
        let mut store = store_on(date(2024, 3, 1));
        // Ends exactly at midnight: back-to-back with "Midnight", no conflict.
        store
            .add_event(event(
                dt(2024, 3, 1, 23, 30),
                dt(2024, 3, 2, 0, 0),
                "Late night",
            ))
            .unwrap();
        store
            .add_event(event(dt(2024, 3, 2, 0, 0), dt(2024, 3, 2, 1, 0), "Midnight"))
            .unwrap();

        let first_day: Vec<_> = store
            .events_on(date(2024, 3, 1))
            .into_iter()
            .map(|e| e.title().to_string())
            .collect();
        assert_eq!(first_day, vec!["Late night"]);

        let second_day: Vec<_> = store
            .events_on(date(2024, 3, 2))
            .into_iter()
            .map(|e| e.title().to_string())
            .collect();
        assert_eq!(second_day, vec!["Midnight"]);
    }

    #[test]
    fn test_events_on_returns_ascending_start_order() {
        let mut store = store_on(date(2024, 3, 1));
        store
            .add_event(event(dt(2024, 3, 1, 14, 0), dt(2024, 3, 1, 15, 0), "Later"))
            .unwrap();
        store
            .add_event(event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Earlier"))
            .unwrap();

        let titles: Vec<_> = store
            .events_on(date(2024, 3, 1))
            .into_iter()
            .map(|e| e.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Earlier", "Later"]);
    }

    #[test]
    fn test_delete_removes_by_value_and_reports_result() {
        let mut store = store_on(date(2024, 3, 1));
        let standup = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup");
        store.add_event(standup.clone()).unwrap();

        assert!(store.delete_event(&standup));
        assert!(!store.delete_event(&standup));
        assert!(!store.has_events_on(date(2024, 3, 1)));
    }

    #[test]
    fn test_cursor_navigation() {
        let mut store = store_on(date(2024, 3, 15));
        assert_eq!(store.selected_date(), date(2024, 3, 15));

        store.set_selected_date(date(1999, 12, 31));
        assert_eq!(store.selected_date(), date(1999, 12, 31));

        store.advance_selected(DateUnit::Day, 1);
        assert_eq!(store.selected_date(), date(2000, 1, 1));

        store.advance_selected(DateUnit::Year, -1);
        assert_eq!(store.selected_date(), date(1999, 1, 1));

        store.go_to_today();
        assert_eq!(store.selected_date(), date(2024, 3, 15));
    }

    #[test]
    fn test_month_advance_clamps_to_end_of_target_month() {
        let mut store = store_on(date(2024, 1, 31));
        store.advance_selected(DateUnit::Month, 1);
        assert_eq!(store.selected_date(), date(2024, 2, 29));

        let mut store = store_on(date(2023, 3, 31));
        store.advance_selected(DateUnit::Month, -1);
        assert_eq!(store.selected_date(), date(2023, 2, 28));
    }

    #[test]
    fn test_observers_fire_in_attachment_order_after_mutations() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let mut store = store_on(date(2024, 3, 1));
        let first = Rc::clone(&log);
        store.attach_observer(Box::new(move || first.borrow_mut().push("first")));
        let second = Rc::clone(&log);
        store.attach_observer(Box::new(move || second.borrow_mut().push("second")));

        store.go_to_today();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_no_op_delete_does_not_notify() {
        let fired = Rc::new(RefCell::new(0u32));

        let mut store = store_on(date(2024, 3, 1));
        let counter = Rc::clone(&fired);
        store.attach_observer(Box::new(move || *counter.borrow_mut() += 1));

        let ghost = event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Ghost");
        assert!(!store.delete_event(&ghost));
        assert_eq!(*fired.borrow(), 0);

        store.add_event(ghost.clone()).unwrap();
        assert_eq!(*fired.borrow(), 1);
        assert!(store.delete_event(&ghost));
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn test_failed_add_does_not_notify() {
        let fired = Rc::new(RefCell::new(0u32));

        let mut store = store_on(date(2024, 3, 1));
        store
            .add_event(event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup"))
            .unwrap();

        let counter = Rc::clone(&fired);
        store.attach_observer(Box::new(move || *counter.borrow_mut() += 1));

        let clash = event(dt(2024, 3, 1, 9, 30), dt(2024, 3, 1, 9, 45), "Clash");
        assert!(store.add_event(clash).is_err());
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_hydrate_loads_trusted_events() {
        let mut store = store_on(date(2024, 3, 1));
        store.hydrate(vec![
            event(dt(2024, 3, 1, 14, 0), dt(2024, 3, 1, 15, 0), "Review"),
            event(dt(2024, 3, 1, 9, 0), dt(2024, 3, 1, 10, 0), "Standup"),
        ]);

        let titles: Vec<_> = store.events().map(|e| e.title().to_string()).collect();
        assert_eq!(titles, vec!["Standup", "Review"]);
    }
}
