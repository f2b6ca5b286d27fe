//! Logger setup.
//!
//! The core crate logs through the `log` facade; this wires it to stderr.

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};

/// Start logging at `level` (or debug with `verbose`). `RUST_LOG` wins over both.
///
/// The returned handle must be kept alive for the logger to keep writing.
pub fn init(level: &str, verbose: bool) -> Result<LoggerHandle> {
    let spec = if verbose { "debug" } else { level };

    Logger::try_with_env_or_str(spec)
        .with_context(|| format!("Invalid log level '{}'", spec))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")
}
