use anyhow::Result;
use chrono::NaiveDate;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{EventStore, MoveOutcome, MoveRequest};
use owo_colors::OwoColorize;

use super::resolve_event;

pub fn run<S: KeyValueStore>(store: &mut EventStore<S>, id: &str, target: NaiveDate) -> Result<()> {
    let event = resolve_event(store, id)?.clone();

    match store.apply_move(MoveRequest::new(event.id.clone(), target))? {
        MoveOutcome::Moved { from } => {
            println!(
                "{} {} → {}",
                format!("  Moved: {}", event.name).green(),
                from.to_string().dimmed(),
                target.to_string().green()
            );
        }
        MoveOutcome::SameDay => {
            println!("{}", format!("  {} is already on {}", event.name, target).dimmed());
        }
        MoveOutcome::NotFound => anyhow::bail!("No event with id '{}'", id),
    }

    Ok(())
}
