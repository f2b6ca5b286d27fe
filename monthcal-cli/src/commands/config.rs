use std::path::Path;

use anyhow::{Context, Result};
use monthcal_core::config::MonthCalConfig;
use owo_colors::OwoColorize;

/// Show where monthcal keeps things and the options in effect.
pub fn run(config: &MonthCalConfig, config_path: &Path) -> Result<()> {
    let data_path = config.data_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Events:   {}", data_path.join("events.json").display());
    println!("  Exports:  {}", config.export_path().display());
    println!();
    println!("{}", "Options".bold());
    println!("  default_color = {}", config.default_color.label().to_lowercase());
    println!("  log_level     = {}", config.log_level);

    Ok(())
}

/// Change one option in the config file.
pub fn set(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = MonthCalConfig::load_file(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    config.set(key, value)?;
    config
        .save(config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{}", format!("  Set {} = {}", key, value).green());
    Ok(())
}
