use std::str::FromStr;

use anyhow::Result;
use monthcal_core::date_range::parse_date;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{EventColor, EventPatch, EventStore, Outcome, WallTime};
use owo_colors::OwoColorize;

use super::{EventFields, resolve_event};
use crate::render::Render;

pub fn run<S: KeyValueStore>(store: &mut EventStore<S>, id: &str, fields: EventFields) -> Result<()> {
    let patch = build_patch(fields)?;
    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --date, --name, --start, --end, --description or --color.");
    }

    let event_id = resolve_event(store, id)?.id.clone();

    match store.update(&event_id, patch)? {
        Outcome::Applied => {}
        Outcome::NotFound => anyhow::bail!("No event with id '{}'", id),
    }

    if let Some(event) = store.get(&event_id) {
        println!("{}", format!("  Updated: {}", event.name).green());
        println!("  {} {}", event.date, event.render());
    }

    Ok(())
}

fn build_patch(fields: EventFields) -> Result<EventPatch> {
    Ok(EventPatch {
        date: fields.date.as_deref().map(parse_date).transpose()?,
        name: fields.name,
        start_time: fields.start.as_deref().map(WallTime::from_str).transpose()?,
        end_time: fields.end.as_deref().map(WallTime::from_str).transpose()?,
        description: fields.description,
        color: fields.color.as_deref().map(EventColor::from_str).transpose()?,
    })
}
