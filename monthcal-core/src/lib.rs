//! Core of the monthcal calendar.
//!
//! - `event`: the event record and its creation/update inputs
//! - `date_range`: the month grid shown for a reference date
//! - `store`: the event store, persisted through a `storage::KeyValueStore`
//! - `day_index`: which events fall on a day or in a month
//! - `export`: JSON/CSV export of a month's events

pub mod config;
pub mod date_range;
pub mod day_index;
pub mod error;
pub mod event;
pub mod export;
pub mod storage;
pub mod store;

pub use error::{MonthCalError, MonthCalResult};
pub use event::{Event, EventColor, EventDraft, EventPatch, WallTime};
pub use store::{EventStore, MoveOutcome, MoveRequest, Outcome, StartupState};
