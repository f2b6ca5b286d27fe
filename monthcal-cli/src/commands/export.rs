use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use monthcal_core::EventStore;
use monthcal_core::export::{ExportFormat, export_filename, export_month};
use monthcal_core::storage::KeyValueStore;
use owo_colors::OwoColorize;

use super::pluralize;
use crate::utils::tui::create_spinner;

pub fn run<S: KeyValueStore>(
    store: &EventStore<S>,
    reference: NaiveDate,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<()> {
    let filename = export_filename(reference, format);
    let spinner = create_spinner(format!("Exporting {}...", filename));

    let result = export_month(store.all(), reference, format)
        .and_then(|file| file.write_to(out_dir));
    spinner.finish_and_clear();

    let written = result.with_context(|| format!("Failed to export {}", filename))?;
    let count = store.by_month(reference).len();

    println!(
        "{} {}",
        format!("  Exported {} {}:", count, pluralize("event", count)).green(),
        written.path.display()
    );
    if written.replaced {
        println!("{}", "  (replaced the previous export of this month)".yellow());
    }

    Ok(())
}
