use anyhow::Result;
use chrono::NaiveDate;
use monthcal_core::{Event, EventStore};
use monthcal_core::storage::KeyValueStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<S: KeyValueStore>(store: &EventStore<S>, date: NaiveDate) -> Result<()> {
    println!("{}", date.format("%A, %B %-d, %Y").bold());

    let events = store.by_date(date);
    if events.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    for event in events {
        for line in event_lines(event) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// The summary line, one line per description line, then the id.
fn event_lines(event: &Event) -> Vec<String> {
    let mut lines = vec![format!("  {}", event.render())];
    if let Some(description) = &event.description {
        lines.extend(description.lines().map(|line| format!("      {}", line)));
    }
    lines.push(format!("      {}", format!("id: {}", event.id).dimmed()));
    lines
}
