pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod month;
pub mod move_event;

use anyhow::Result;
use clap::Args;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{Event, EventStore};

/// Event fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct EventFields {
    /// Day of the event (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    #[arg(short, long)]
    pub name: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Description (pass "" to clear it)
    #[arg(long)]
    pub description: Option<String>,

    /// red, blue, green, yellow or purple
    #[arg(short, long)]
    pub color: Option<String>,
}

/// Find an event by its full id, or by a prefix matching exactly one event.
pub fn resolve_event<'a, S: KeyValueStore>(store: &'a EventStore<S>, id: &str) -> Result<&'a Event> {
    if let Some(event) = store.get(id) {
        return Ok(event);
    }

    let matches: Vec<&Event> = store.all().iter().filter(|e| e.id.starts_with(id)).collect();
    match matches.as_slice() {
        [event] => Ok(*event),
        [] => anyhow::bail!("No event with id '{}'", id),
        _ => anyhow::bail!(
            "Id '{}' matches {} events. Use more characters.",
            id,
            matches.len()
        ),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthcal_core::EventDraft;
    use monthcal_core::storage::MemoryStore;

    fn store_with(ids: &[&str]) -> EventStore<MemoryStore> {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        for id in ids {
            let draft = EventDraft::new(
                "2024-03-15".parse().unwrap(),
                *id,
                "09:00".parse().unwrap(),
                "10:00".parse().unwrap(),
            )
            .with_id(*id);
            store.add(draft).unwrap();
        }
        store
    }

    #[test]
    fn test_resolve_exact_id_wins_over_prefix() {
        let store = store_with(&["abc", "abcd"]);
        assert_eq!(resolve_event(&store, "abc").unwrap().id, "abc");
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let store = store_with(&["0190a1-x", "0190b2-y"]);
        assert_eq!(resolve_event(&store, "0190b").unwrap().id, "0190b2-y");
    }

    #[test]
    fn test_resolve_ambiguous_or_missing() {
        let store = store_with(&["0190a1-x", "0190a2-y"]);
        assert!(resolve_event(&store, "0190a").is_err());
        assert!(resolve_event(&store, "ffff").is_err());
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 2), "events");
    }
}
