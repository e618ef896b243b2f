//! Tracing subscriber setup for the binary.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Standard error, for headless commands.
    Stderr,
    /// A file, for the interactive view which owns the terminal.
    File(&'a Path),
    /// Nowhere.
    Off,
}

/// Install the global subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init(target: LogTarget<'_>) -> Result<(), String> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| format!("cannot set up logging: {e}")),
        LogTarget::File(path) => {
            let file = File::create(path)
                .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| format!("cannot set up logging: {e}"))
        }
    }
}
