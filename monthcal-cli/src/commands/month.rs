use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use monthcal_core::date_range::{GridDay, MonthGrid, WEEKDAY_LABELS, month_title};
use monthcal_core::day_index::DayIndex;
use monthcal_core::storage::KeyValueStore;
use monthcal_core::{EventColor, EventStore};
use owo_colors::OwoColorize;

use super::pluralize;
use crate::render::{paint, truncate};

/// Inner width of a grid cell, in characters.
const CELL_WIDTH: usize = 12;

/// What a day cell shows: the first event and how many others are hidden.
#[derive(Debug, PartialEq)]
struct DayCell {
    day: GridDay,
    is_today: bool,
    first: Option<(String, EventColor)>,
    more: usize,
}

pub fn run<S: KeyValueStore>(store: &EventStore<S>, reference: NaiveDate, today: NaiveDate) -> Result<()> {
    let grid = MonthGrid::for_date(reference);
    let index = DayIndex::for_grid(store.all(), &grid);
    let count = store.by_month(reference).len();

    println!("{}", month_title(reference).bold());
    println!(
        "{}",
        format!("{} {} this month", count, pluralize("event", count)).dimmed()
    );
    println!();

    let header: Vec<String> = WEEKDAY_LABELS
        .iter()
        .map(|label| format!(" {:<width$}", label, width = CELL_WIDTH))
        .collect();
    println!("{}", header.join("|").bold());

    let separator = vec!["-".repeat(CELL_WIDTH + 1); WEEKDAY_LABELS.len()].join("+");
    for week in grid.weeks() {
        let cells: Vec<DayCell> = week.iter().map(|day| day_cell(*day, &index, today)).collect();

        println!("{}", separator.dimmed());
        println!("{}", join_cells(&cells, render_day_number));
        println!("{}", join_cells(&cells, render_first_event));
        println!("{}", join_cells(&cells, render_more));
    }
    println!("{}", separator.dimmed());

    Ok(())
}

fn day_cell(day: GridDay, index: &DayIndex<'_>, today: NaiveDate) -> DayCell {
    let events = index.events_on(day.date);
    DayCell {
        day,
        is_today: day.date == today,
        first: events.first().map(|e| (e.name.clone(), e.color)),
        more: index.count_on(day.date).saturating_sub(1),
    }
}

fn join_cells(cells: &[DayCell], line: fn(&DayCell) -> String) -> String {
    cells.iter().map(line).collect::<Vec<_>>().join("|")
}

/// Pad to the cell width before coloring so escape codes don't skew columns.
fn pad(text: &str) -> String {
    format!(" {:<width$}", truncate(text, CELL_WIDTH), width = CELL_WIDTH)
}

fn render_day_number(cell: &DayCell) -> String {
    let text = pad(&format!("{:>2}", cell.day.date.day()));
    if cell.is_today {
        text.blue().bold().to_string()
    } else if !cell.day.in_month {
        text.dimmed().to_string()
    } else {
        text
    }
}

fn render_first_event(cell: &DayCell) -> String {
    match &cell.first {
        Some((name, color)) if cell.day.in_month => paint(*color, &pad(name)),
        Some((name, _)) => pad(name).dimmed().to_string(),
        None => pad(""),
    }
}

fn render_more(cell: &DayCell) -> String {
    if cell.more > 0 {
        pad(&format!("+{} more", cell.more)).dimmed().to_string()
    } else {
        pad("")
    }
}
