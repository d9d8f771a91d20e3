// FILE: crates/cli/src/logging.rs

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// Name of the marker file that turns on debug logging
pub const DEBUG_MARKER: &str = "debug";

/// Picks the default log filter; `RUST_LOG` still wins when set
pub fn default_filter(verbose: bool, debug_marker: bool) -> &'static str {
    if verbose || debug_marker {
        "debug"
    } else {
        "info"
    }
}

pub fn debug_marker_present(dir: &Path) -> bool {
    dir.join(DEBUG_MARKER).is_file()
}

/// Initializes env_logger, optionally appending to a log file
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let marker = debug_marker_present(Path::new("."));
    let env = env_logger::Env::default().default_filter_or(default_filter(verbose, marker));
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("Failed to initialize logging")?;

    if marker {
        log::debug!("Debug marker file found, debug logging enabled");
    }

    Ok(())
}
