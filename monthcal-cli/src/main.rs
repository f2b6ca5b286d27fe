mod commands;
mod logging;
mod render;
mod utils;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use monthcal_core::config::MonthCalConfig;
use monthcal_core::date_range::{parse_date, parse_month_ref, shift_month};
use monthcal_core::export::ExportFormat;
use monthcal_core::storage::FileStore;
use monthcal_core::{EventStore, StartupState};
use owo_colors::OwoColorize;

use crate::commands::EventFields;

#[derive(Parser)]
#[command(name = "monthcal")]
#[command(about = "A month-view calendar for your personal events")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Months to move from there (e.g. -1 for the previous month)
        #[arg(short, long, allow_hyphen_values = true)]
        shift: Option<i32>,
    },
    /// List the events on a day
    Day {
        /// Day to list (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },
    /// Add an event (prompts for anything not given)
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Change fields of an existing event
    Edit {
        /// Event id (or a unique prefix of it)
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        /// Event id (or a unique prefix of it)
        id: String,
    },
    /// Move an event to another day, keeping its times
    Move {
        /// Event id (or a unique prefix of it)
        id: String,

        /// Target day (YYYY-MM-DD)
        date: String,
    },
    /// Show paths and options, or change an option
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Export a month's events to events_<YYYY-MM>.<json|csv>
    Export {
        /// Month to export (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Output directory, defaults to the configured export_dir
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set an option (data_dir, export_dir, default_color, log_level)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MonthCalConfig::load().context("Failed to load configuration")?;
    let _logger = logging::init(&config.log_level, cli.verbose)?;

    if let Commands::Config { action } = &cli.command {
        let config_path = MonthCalConfig::config_path()?;
        return match action {
            Some(ConfigAction::Set { key, value }) => {
                commands::config::set(&config_path, key, value)
            }
            None => commands::config::run(&config, &config_path),
        };
    }

    let mut store = open_store(&config)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Month { month, shift } => {
            let reference = resolve_reference(month.as_deref(), shift, today)?;
            commands::month::run(&store, reference, today)
        }
        Commands::Day { date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };
            commands::day::run(&store, date)
        }
        Commands::Add { fields } => {
            commands::add::run(&mut store, fields, config.default_color, today)
        }
        Commands::Edit { id, fields } => commands::edit::run(&mut store, &id, fields),
        Commands::Delete { id } => commands::delete::run(&mut store, &id),
        Commands::Move { id, date } => {
            let target = parse_date(&date)?;
            commands::move_event::run(&mut store, &id, target)
        }
        Commands::Export { month, format, out } => {
            let reference = resolve_reference(month.as_deref(), None, today)?;
            let out_dir = out.unwrap_or_else(|| config.export_path());
            commands::export::run(&store, reference, format, &out_dir)
        }
        // Handled before the store is opened.
        Commands::Config { .. } => Ok(()),
    }
}

fn open_store(config: &MonthCalConfig) -> Result<EventStore<FileStore>> {
    let storage = config.file_store()?;
    let data_dir = storage.dir().to_path_buf();
    let store = EventStore::open(storage)
        .with_context(|| format!("Failed to open event store in {}", data_dir.display()))?;

    if let StartupState::Recovered { reason, backup } = store.startup_state() {
        let kept = match backup {
            Some(key) => format!("the old data was kept as {}.json", key),
            None => "the old data could not be kept".to_string(),
        };
        eprintln!(
            "{}",
            format!(
                "Warning: stored events in {} could not be read ({}). Starting with an empty calendar; {}.",
                data_dir.display(),
                reason,
                kept
            )
            .yellow()
        );
    }

    Ok(store)
}

/// The reference month: `--month` (or today), moved by `--shift` months.
fn resolve_reference(month: Option<&str>, shift: Option<i32>, today: NaiveDate) -> Result<NaiveDate> {
    let base = match month {
        Some(m) => parse_month_ref(m)?,
        None => today,
    };
    Ok(shift_month(base, shift.unwrap_or(0)))
}
