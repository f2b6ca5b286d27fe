//! Local key-value persistence.
//!
//! [`KeyValueStore`] is the contract the event store persists through: string
//! values under string keys, read and written synchronously. [`FileStore`] keeps
//! one file per key in the data directory; [`MemoryStore`] is used in tests and
//! anywhere persistence is not wanted.

mod file;
mod memory;

pub use file::{FileStore, atomic_write};
pub use memory::MemoryStore;

use crate::error::MonthCalResult;

/// Key holding the JSON array of all events.
pub const EVENTS_KEY: &str = "events";

/// Key the unreadable payload is moved to when the events key fails to parse.
pub const CORRUPT_EVENTS_KEY: &str = "events.corrupt";

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> MonthCalResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> MonthCalResult<()>;
}
