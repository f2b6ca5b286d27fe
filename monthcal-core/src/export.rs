//! Month export to JSON or CSV.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::date_range::month_key;
use crate::day_index::events_in_month;
use crate::error::{MonthCalError, MonthCalResult};
use crate::event::Event;
use crate::storage::atomic_write;

/// CSV column order.
pub const CSV_COLUMNS: [&str; 7] = [
    "id",
    "date",
    "name",
    "startTime",
    "endTime",
    "description",
    "color",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MonthCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(MonthCalError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A rendered export, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub media_type: &'static str,
    pub content: String,
}

/// Where an export landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenExport {
    pub path: PathBuf,
    /// An earlier export of the same month was replaced.
    pub replaced: bool,
}

impl ExportFile {
    /// Write the export into `dir` under its filename.
    ///
    /// The file is replaced atomically, so an interrupted export never leaves a
    /// truncated file behind.
    pub fn write_to(&self, dir: &Path) -> MonthCalResult<WrittenExport> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        let replaced = path.exists();
        if replaced {
            warn!("replacing existing export {}", path.display());
        }

        atomic_write(&path, &self.content)?;
        debug!("exported {} bytes to {}", self.content.len(), path.display());
        Ok(WrittenExport { path, replaced })
    }
}

/// `events_<YYYY-MM>.<ext>`
pub fn export_filename(reference: NaiveDate, format: ExportFormat) -> String {
    format!("events_{}.{}", month_key(reference), format.extension())
}

/// Export the events of `reference`'s month, in collection order.
pub fn export_month(
    events: &[Event],
    reference: NaiveDate,
    format: ExportFormat,
) -> MonthCalResult<ExportFile> {
    let selected = events_in_month(events, reference);

    let content = match format {
        ExportFormat::Json => render_json(&selected)?,
        ExportFormat::Csv => render_csv(&selected)?,
    };

    Ok(ExportFile {
        filename: export_filename(reference, format),
        media_type: format.media_type(),
        content,
    })
}

/// Pretty-printed JSON array; `[]` when nothing matches.
pub fn render_json(events: &[&Event]) -> MonthCalResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Header row plus one row per event. Every data field is quoted and escaped
/// as a JSON string literal; a missing description is `""`.
pub fn render_csv(events: &[&Event]) -> MonthCalResult<String> {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(CSV_COLUMNS.join(","));

    for event in events {
        let fields = csv_fields(event);
        let quoted = fields
            .iter()
            .map(|field| serde_json::to_string(field))
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(quoted.join(","));
    }

    Ok(lines.join("\n"))
}

fn csv_fields(event: &Event) -> [String; 7] {
    [
        event.id.clone(),
        event.date.format("%Y-%m-%d").to_string(),
        event.name.clone(),
        event.start_time.to_string(),
        event.end_time.to_string(),
        event.description.clone().unwrap_or_default(),
        event.color.tag().to_string(),
    ]
}

// =============================================================================
// Tests
// =============================================================================
