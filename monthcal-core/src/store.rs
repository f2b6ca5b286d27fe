//! The event store.
//!
//! Owns the canonical, insertion-ordered collection of events and mirrors it to
//! a [`KeyValueStore`] after every mutation. Everything else gets read-only
//! views.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::day_index;
use crate::error::{MonthCalError, MonthCalResult};
use crate::event::{Event, EventDraft, EventPatch};
use crate::storage::{CORRUPT_EVENTS_KEY, EVENTS_KEY, KeyValueStore};

/// Result of an update or delete addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// No event has that id. Nothing was changed or persisted.
    NotFound,
}

/// A request to reschedule an event onto another day (a drag-and-drop drop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub event_id: String,
    pub target_date: NaiveDate,
}

impl MoveRequest {
    pub fn new(event_id: impl Into<String>, target_date: NaiveDate) -> Self {
        MoveRequest {
            event_id: event_id.into(),
            target_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: NaiveDate },
    /// The event is already on the target day.
    SameDay,
    NotFound,
}

/// How the collection was obtained when the store was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupState {
    /// Nothing was stored yet.
    Empty,
    Restored(usize),
    /// Stored data could not be parsed; the store started empty. `backup` is
    /// the key the raw payload was kept under, if keeping it succeeded.
    Recovered {
        reason: String,
        backup: Option<String>,
    },
}

pub struct EventStore<S: KeyValueStore> {
    storage: S,
    events: Vec<Event>,
    startup: StartupState,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Open the store, rehydrating any previously saved events.
    ///
    /// Malformed stored data is not an error: it is logged, set aside, and the
    /// store starts empty. Failing to read the storage at all is an error.
    pub fn open(mut storage: S) -> MonthCalResult<Self> {
        let (events, startup) = match storage.get_item(EVENTS_KEY)? {
            None => (Vec::new(), StartupState::Empty),
            Some(raw) if raw.trim().is_empty() => (Vec::new(), StartupState::Empty),
            Some(raw) => match deserialize_events(&raw) {
                Ok(events) => {
                    let count = events.len();
                    (events, StartupState::Restored(count))
                }
                Err(e) => {
                    warn!("stored events are unreadable, starting empty: {e}");
                    let backup = match keep_aside(&mut storage, &raw) {
                        Ok(key) => Some(key),
                        Err(backup_err) => {
                            warn!("could not keep unreadable events aside: {backup_err}");
                            None
                        }
                    };
                    (
                        Vec::new(),
                        StartupState::Recovered {
                            reason: e.to_string(),
                            backup,
                        },
                    )
                }
            },
        };

        if has_duplicate_ids(&events) {
            warn!("stored events contain duplicate ids; lookups use the first match");
        }
        info!("event store opened: {startup:?}");

        Ok(EventStore {
            storage,
            events,
            startup,
        })
    }

    pub fn startup_state(&self) -> &StartupState {
        &self.startup
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // READS:

    /// All events in insertion order.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn by_date(&self, date: NaiveDate) -> Vec<&Event> {
        day_index::events_on(&self.events, date)
    }

    /// Events in the same year and month as `reference`.
    pub fn by_month(&self, reference: NaiveDate) -> Vec<&Event> {
        day_index::events_in_month(&self.events, reference)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    // MUTATIONS:

    /// Append a new event, generating an id unless the draft carries one.
    pub fn add(&mut self, draft: EventDraft) -> MonthCalResult<Event> {
        let event = draft.into_event()?;
        if self.get(&event.id).is_some() {
            return Err(MonthCalError::DuplicateId(event.id));
        }

        let mut next = self.events.clone();
        next.push(event.clone());
        self.commit(next)?;

        debug!("added event {} on {}", event.id, event.date);
        Ok(event)
    }

    /// Replace the fields given in `patch` on the event with `id`.
    pub fn update(&mut self, id: &str, patch: EventPatch) -> MonthCalResult<Outcome> {
        let Some(pos) = self.position(id) else {
            debug!("update skipped, no event {id}");
            return Ok(Outcome::NotFound);
        };

        let updated = self.events[pos].patched(patch)?;
        let mut next = self.events.clone();
        next[pos] = updated;
        self.commit(next)?;

        debug!("updated event {id}");
        Ok(Outcome::Applied)
    }

    pub fn remove(&mut self, id: &str) -> MonthCalResult<Outcome> {
        let Some(pos) = self.position(id) else {
            debug!("remove skipped, no event {id}");
            return Ok(Outcome::NotFound);
        };

        let mut next = self.events.clone();
        next.remove(pos);
        self.commit(next)?;

        debug!("removed event {id}");
        Ok(Outcome::Applied)
    }

    /// Reschedule an event. Only its date changes.
    pub fn apply_move(&mut self, request: MoveRequest) -> MonthCalResult<MoveOutcome> {
        let Some(from) = self.get(&request.event_id).map(|e| e.date) else {
            return Ok(MoveOutcome::NotFound);
        };
        if from == request.target_date {
            return Ok(MoveOutcome::SameDay);
        }

        match self.update(&request.event_id, EventPatch::reschedule(request.target_date))? {
            Outcome::Applied => Ok(MoveOutcome::Moved { from }),
            Outcome::NotFound => Ok(MoveOutcome::NotFound),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    /// Persist `next` and make it the current collection.
    ///
    /// The in-memory collection only changes once the write succeeded.
    fn commit(&mut self, next: Vec<Event>) -> MonthCalResult<()> {
        let serialized = serialize_events(&next)?;
        self.storage.set_item(EVENTS_KEY, &serialized)?;
        self.events = next;
        Ok(())
    }
}

/// The persisted form of the collection: a pretty-printed JSON array.
pub fn serialize_events(events: &[Event]) -> MonthCalResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

pub fn deserialize_events(raw: &str) -> MonthCalResult<Vec<Event>> {
    Ok(serde_json::from_str(raw)?)
}

/// Store an unreadable payload under the first free backup key
/// (`events.corrupt`, `events.corrupt.1`, ...) and return that key.
///
/// A payload already kept under one of those keys is not stored again.
fn keep_aside<S: KeyValueStore>(storage: &mut S, raw: &str) -> MonthCalResult<String> {
    let mut attempt = 0u32;
    loop {
        let key = if attempt == 0 {
            CORRUPT_EVENTS_KEY.to_string()
        } else {
            format!("{CORRUPT_EVENTS_KEY}.{attempt}")
        };

        match storage.get_item(&key)? {
            None => {
                storage.set_item(&key, raw)?;
                warn!("unreadable events kept under '{key}'");
                return Ok(key);
            }
            Some(existing) if existing == raw => return Ok(key),
            Some(_) => attempt += 1,
        }
    }
}

fn has_duplicate_ids(events: &[Event]) -> bool {
    let mut seen = std::collections::HashSet::new();
    events.iter().any(|e| !seen.insert(e.id.as_str()))
}

// =============================================================================
// Tests
// =============================================================================
