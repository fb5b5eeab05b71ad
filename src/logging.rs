// Diagnostic logging setup (tracing). Separate from the user-facing batch log.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Where tracing output goes
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Headless commands: stderr, next to the user output on stdout
    Stderr,
    /// Append to a file (the TUI owns the terminal)
    File(&'a Path),
    /// Drop everything
    Off,
}

pub fn init(target: LogTarget<'_>, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}
