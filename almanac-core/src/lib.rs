//! Core types for the almanac calendar.
//!
//! This crate provides the event model and store shared by every almanac
//! front-end:
//! - `Event`, a validated titled time interval at minute precision
//! - `EventStore`, the sorted event collection plus the cursor date,
//!   with conflict detection and synchronous change notification
//! - `datetime`, pure day-bucket and formatting helpers
//! - `snapshot`, the versioned flat-file persistence format
//!
//! It performs no terminal or network I/O and reads no environment.

pub mod clock;
pub mod datetime;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AlmanacError, AlmanacResult};
pub use event::Event;
pub use store::{ChangeObserver, DateUnit, EventStore};
