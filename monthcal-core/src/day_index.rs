//! Event-to-day binning.
//!
//! All "is this event on that day / in that month" questions go through here so
//! the whole crate uses the same calendar-date equality.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::date_range::MonthGrid;
use crate::event::Event;

pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Events on `date`, in collection order.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|e| same_day(e.date, date)).collect()
}

/// Events in the same year and month as `reference`, in collection order.
pub fn events_in_month(events: &[Event], reference: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| same_month(e.date, reference))
        .collect()
}

/// Events binned by day, built once per render.
#[derive(Debug, Default)]
pub struct DayIndex<'a> {
    by_day: BTreeMap<NaiveDate, Vec<&'a Event>>,
}

impl<'a> DayIndex<'a> {
    /// Only the days `grid` shows.
    pub fn for_grid(events: &'a [Event], grid: &MonthGrid) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<&'a Event>> = BTreeMap::new();
        for event in events
            .iter()
            .filter(|e| e.date >= grid.grid_start && e.date <= grid.grid_end)
        {
            by_day.entry(event.date).or_default().push(event);
        }
        DayIndex { by_day }
    }

    pub fn events_on(&self, date: NaiveDate) -> &[&'a Event] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.events_on(date).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, date: NaiveDate) -> Event {
        EventDraft::new(date, id, "09:00".parse().unwrap(), "10:00".parse().unwrap())
            .with_id(id)
            .into_event()
            .unwrap()
    }

    fn sample() -> Vec<Event> {
        vec![
            event("a", ymd(2024, 3, 15)),
            event("b", ymd(2024, 3, 16)),
            event("c", ymd(2024, 3, 15)),
            event("d", ymd(2024, 4, 1)),
            event("e", ymd(2023, 3, 15)),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_events_on_keeps_collection_order() {
        let events = sample();
        assert_eq!(ids(&events_on(&events, ymd(2024, 3, 15))), ["a", "c"]);
        assert!(events_on(&events, ymd(2024, 3, 17)).is_empty());
    }

    #[test]
    fn test_events_in_month_matches_year_and_month() {
        let events = sample();
        assert_eq!(
            ids(&events_in_month(&events, ymd(2024, 3, 31))),
            ["a", "b", "c"]
        );
        assert_eq!(ids(&events_in_month(&events, ymd(2023, 3, 1))), ["e"]);
    }

    #[test]
    fn test_index_agrees_with_filter() {
        let events = sample();
        let grid = MonthGrid::for_date(ymd(2024, 3, 1));
        let index = DayIndex::for_grid(&events, &grid);
        for date in grid.days() {
            assert_eq!(ids(index.events_on(date)), ids(&events_on(&events, date)));
        }
        assert_eq!(index.count_on(ymd(2024, 3, 15)), 2);
    }

    #[test]
    fn test_grid_index_includes_neighbor_days_only_in_range() {
        let events = sample();
        let grid = MonthGrid::for_date(ymd(2024, 3, 1));
        let index = DayIndex::for_grid(&events, &grid);

        // April 1st is a trailing grid day of March 2024.
        assert_eq!(index.count_on(ymd(2024, 4, 1)), 1);
        assert_eq!(index.count_on(ymd(2023, 3, 15)), 0);
        assert_eq!(index.count_on(ymd(2024, 3, 16)), 1);
    }
}
