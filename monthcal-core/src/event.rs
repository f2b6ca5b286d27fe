//! Event records and the inputs used to create and change them.
//!
//! An [`Event`] is the only persisted entity. It is serialized with camelCase
//! field names in the order `id, date, name, startTime, endTime, description,
//! color`, which is both the storage format and the JSON export format. All
//! seven fields are always written.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{MonthCalError, MonthCalResult};

/// A calendar event on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub start_time: WallTime,
    pub end_time: WallTime,
    /// Written as `""` when absent; a blank stored value reads back as `None`.
    #[serde(
        default,
        serialize_with = "serialize_description",
        deserialize_with = "deserialize_description"
    )]
    pub description: Option<String>,
    #[serde(default)]
    pub color: EventColor,
}

impl Event {
    /// Time range as shown in listings, e.g. `09:00-09:15`.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }

    fn apply(&mut self, patch: EventPatch) -> MonthCalResult<()> {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(name) = patch.name {
            self.name = validate_name(&name)?;
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        if let Some(description) = patch.description {
            self.description = normalize_description(description);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        Ok(())
    }

    /// Returns a copy of this event with `patch` applied.
    ///
    /// The original is left untouched when validation fails.
    pub fn patched(&self, patch: EventPatch) -> MonthCalResult<Event> {
        let mut updated = self.clone();
        updated.apply(patch)?;
        Ok(updated)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Generate a fresh, time-ordered event id.
pub fn new_event_id() -> String {
    Uuid::now_v7().to_string()
}

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Caller-supplied id; a fresh one is generated when absent.
    pub id: Option<String>,
    pub date: NaiveDate,
    pub name: String,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub description: Option<String>,
    pub color: EventColor,
}

impl EventDraft {
    pub fn new(
        date: NaiveDate,
        name: impl Into<String>,
        start_time: WallTime,
        end_time: WallTime,
    ) -> Self {
        EventDraft {
            id: None,
            date,
            name: name.into(),
            start_time,
            end_time,
            description: None,
            color: EventColor::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    /// Validate the draft and turn it into an event.
    pub fn into_event(self) -> MonthCalResult<Event> {
        let name = validate_name(&self.name)?;
        let id = match self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(MonthCalError::Validation("id must not be blank".into()));
            }
            Some(id) => id,
            None => new_event_id(),
        };

        Ok(Event {
            id,
            date: self.date,
            name,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.and_then(normalize_description),
            color: self.color,
        })
    }
}

/// Replacement fields for an update. `None` leaves a field as it is.
///
/// `description: Some(String::new())` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub start_time: Option<WallTime>,
    pub end_time: Option<WallTime>,
    pub description: Option<String>,
    pub color: Option<EventColor>,
}

impl EventPatch {
    /// A patch that only reschedules the event.
    pub fn reschedule(date: NaiveDate) -> Self {
        EventPatch {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

fn validate_name(name: &str) -> MonthCalResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MonthCalError::Validation("name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: String) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description)
    }
}

fn serialize_description<S: Serializer>(
    description: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(description.as_deref().unwrap_or_default())
}

fn deserialize_description<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(normalize_description))
}

// =============================================================================
// Wall-clock time
// =============================================================================

/// A wall-clock time of day, stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(WallTime)
    }

}

impl FromStr for WallTime {
    type Err = MonthCalError;

    /// Accepts `HH:MM`, and `HH:MM:SS` with the seconds dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
            .and_then(|t| WallTime::new(t.hour(), t.minute()))
            .ok_or_else(|| MonthCalError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Color palette
// =============================================================================

/// The fixed event color palette.
///
/// Persisted as the tag the calendar has always stored (`bg-red-100`, ...);
/// parsing also accepts the label (`red`, `Blue`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Red,
        EventColor::Blue,
        EventColor::Green,
        EventColor::Yellow,
        EventColor::Purple,
    ];

    /// The persisted palette tag.
    pub fn tag(&self) -> &'static str {
        match self {
            EventColor::Red => "bg-red-100",
            EventColor::Blue => "bg-blue-100",
            EventColor::Green => "bg-green-100",
            EventColor::Yellow => "bg-yellow-100",
            EventColor::Purple => "bg-purple-100",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventColor::Red => "Red",
            EventColor::Blue => "Blue",
            EventColor::Green => "Green",
            EventColor::Yellow => "Yellow",
            EventColor::Purple => "Purple",
        }
    }
}

impl FromStr for EventColor {
    type Err = MonthCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EventColor::ALL
            .into_iter()
            .find(|c| c.tag() == needle || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| MonthCalError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for EventColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
