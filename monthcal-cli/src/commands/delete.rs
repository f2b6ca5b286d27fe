use anyhow::Result;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{EventStore, Outcome};
use owo_colors::OwoColorize;

use super::resolve_event;

pub fn run<S: KeyValueStore>(store: &mut EventStore<S>, id: &str) -> Result<()> {
    let event = resolve_event(store, id)?.clone();

    match store.remove(&event.id)? {
        Outcome::Applied => {
            println!("{}", format!("  Deleted: {} ({})", event.name, event.date).red());
            Ok(())
        }
        Outcome::NotFound => anyhow::bail!("No event with id '{}'", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use monthcal_core::EventDraft;
    use monthcal_core::storage::MemoryStore;

    fn store_with(ids: &[&str]) -> EventStore<MemoryStore> {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        for id in ids {
            store
                .add(
                    EventDraft::new(
                        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                        *id,
                        "09:00".parse().unwrap(),
                        "10:00".parse().unwrap(),
                    )
                    .with_id(*id),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_delete_by_prefix_removes_only_that_event() {
        let mut store = store_with(&["standup-1", "retro-1"]);

        run(&mut store, "standup").unwrap();

        assert!(store.get("standup-1").is_none());
        assert!(store.get("retro-1").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_fails_and_keeps_events() {
        let mut store = store_with(&["standup-1"]);

        assert!(run(&mut store, "missing").is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_ambiguous_prefix_fails() {
        let mut store = store_with(&["standup-1", "standup-2"]);

        assert!(run(&mut store, "standup").is_err());
        assert_eq!(store.len(), 2);
    }
}
