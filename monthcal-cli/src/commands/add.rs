use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use monthcal_core::date_range::parse_date;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{EventColor, EventDraft, EventStore, WallTime};
use owo_colors::OwoColorize;

use super::EventFields;
use crate::render::Render;

pub fn run<S: KeyValueStore>(
    store: &mut EventStore<S>,
    fields: EventFields,
    default_color: EventColor,
    today: NaiveDate,
) -> Result<()> {
    let interactive = fields.name.is_none() || fields.start.is_none() || fields.end.is_none();

    // --- Name ---
    let name = match fields.name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Name")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Name must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    // --- Date ---
    let date = match fields.date {
        Some(d) => parse_date(&d)?,
        None if interactive => prompt_with_retry("  Date", Some(today.to_string()), |s| {
            Ok(parse_date(s)?)
        })?,
        None => today,
    };

    // --- Times ---
    let start_time = match fields.start {
        Some(s) => WallTime::from_str(&s)?,
        None => prompt_with_retry("  Starts (HH:MM)", None, parse_time)?,
    };
    let end_time = match fields.end {
        Some(e) => WallTime::from_str(&e)?,
        None => prompt_with_retry("  Ends (HH:MM)", None, parse_time)?,
    };

    // --- Description ---
    let description = match fields.description {
        Some(d) => d,
        None if interactive => Input::new()
            .with_prompt("  Description (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    // --- Color ---
    let color = match fields.color {
        Some(c) => EventColor::from_str(&c)?,
        None if interactive => select_color(default_color)?,
        None => default_color,
    };

    let draft = EventDraft::new(date, name, start_time, end_time)
        .with_description(description)
        .with_color(color);
    let event = store.add(draft)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.name).green());
    println!("  {} {}", event.date, event.render());
    println!("  {}", format!("id: {}", event.id).dimmed());

    Ok(())
}

fn parse_time(input: &str) -> Result<WallTime> {
    Ok(WallTime::from_str(input)?)
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, default: Option<String>, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = &default {
            input = input.default(default.clone());
        }
        let answer = input.interact_text()?;
        match parse(answer.trim()) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn select_color(default_color: EventColor) -> Result<EventColor> {
    let items: Vec<String> = EventColor::ALL.iter().map(|c| c.render()).collect();
    let default_index = EventColor::ALL
        .iter()
        .position(|c| *c == default_color)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Color")
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(EventColor::ALL[selection])
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthcal_core::storage::MemoryStore;

    fn fields(date: &str, name: &str, start: &str, end: &str) -> EventFields {
        EventFields {
            date: Some(date.into()),
            name: Some(name.into()),
            start: Some(start.into()),
            end: Some(end.into()),
            description: None,
            color: None,
        }
    }

    #[test]
    fn test_add_with_all_flags_uses_default_color() {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        run(
            &mut store,
            fields("2024-03-15", "Standup", "09:00", "09:15"),
            EventColor::Green,
            today,
        )
        .unwrap();

        let event = &store.all()[0];
        assert_eq!(event.name, "Standup");
        assert_eq!(event.date.to_string(), "2024-03-15");
        assert_eq!(event.color, EventColor::Green);
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_add_rejects_bad_time() {
        let mut store = EventStore::open(MemoryStore::new()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let result = run(
            &mut store,
            fields("2024-03-15", "Standup", "9 o'clock", "09:15"),
            EventColor::Red,
            today,
        );

        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
