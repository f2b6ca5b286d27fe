//! Global monthcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{MonthCalError, MonthCalResult};
use crate::event::EventColor;
use crate::storage::FileStore;

static DEFAULT_EXPORT_DIR: &str = ".";
static DEFAULT_LOG_LEVEL: &str = "warn";
static ENV_PREFIX: &str = "MONTHCAL";

/// Options `set` accepts.
pub const OPTIONS: [&str; 4] = ["data_dir", "export_dir", "default_color", "log_level"];

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn is_default_export_dir(p: &PathBuf) -> bool {
    *p == default_export_dir()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/monthcal/config.toml, overridable with
/// `MONTHCAL_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonthCalConfig {
    /// Where events are stored. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Where exports are written.
    #[serde(default = "default_export_dir", skip_serializing_if = "is_default_export_dir")]
    pub export_dir: PathBuf,

    /// Color for new events when none is given.
    #[serde(default)]
    pub default_color: EventColor,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for MonthCalConfig {
    fn default() -> Self {
        MonthCalConfig {
            data_dir: None,
            export_dir: default_export_dir(),
            default_color: EventColor::default(),
            log_level: default_log_level(),
        }
    }
}

impl MonthCalConfig {
    pub fn config_path() -> MonthCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MonthCalError::Config("Could not determine config directory".into()))?
            .join("monthcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, creating a commented default file on first run.
    pub fn load() -> MonthCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) layered with the environment.
    pub fn load_from(path: &Path) -> MonthCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| MonthCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MonthCalError::Config(e.to_string()))
    }

    /// Only what is written in `path`, without environment overrides.
    pub fn load_file(path: &Path) -> MonthCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| MonthCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MonthCalError::Config(e.to_string()))
    }

    /// Set one option from its textual value. An empty `data_dir` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> MonthCalResult<()> {
        match key {
            "data_dir" => {
                self.data_dir = (!value.trim().is_empty()).then(|| PathBuf::from(value.trim()));
            }
            "export_dir" => self.export_dir = PathBuf::from(value.trim()),
            "default_color" => self.default_color = value.parse()?,
            "log_level" => {
                let level = value.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(MonthCalError::Config(format!(
                        "Unknown log level '{value}'. Expected one of: {}",
                        LOG_LEVELS.join(", ")
                    )));
                }
                self.log_level = level;
            }
            _ => {
                return Err(MonthCalError::Config(format!(
                    "Unknown option '{key}'. Expected one of: {}",
                    OPTIONS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Save the current config to `path`.
    pub fn save(&self, path: &Path) -> MonthCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| MonthCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| MonthCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MonthCalResult<()> {
        let contents = format!(
            "\
# monthcal configuration

# Where your events are stored:
# data_dir = \"~/.local/share/monthcal\"

# Where exports are written:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"

# Color for new events (red, blue, green, yellow, purple):
# default_color = \"red\"

# Log level (error, warn, info, debug, trace):
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MonthCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MonthCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> MonthCalResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(expand(dir)),
            None => dirs::data_dir()
                .map(|d| d.join("monthcal"))
                .ok_or_else(|| MonthCalError::Config("Could not determine data directory".into())),
        }
    }

    pub fn export_path(&self) -> PathBuf {
        expand(&self.export_dir)
    }

    /// The file-backed store for this configuration.
    pub fn file_store(&self) -> MonthCalResult<FileStore> {
        Ok(FileStore::new(self.data_path()?))
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
