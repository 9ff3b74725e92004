//! Tracing subscriber setup

use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_level`. With a log file the output goes there
/// without ANSI colors, otherwise to stderr.
pub fn init(log_file: Option<&Path>, default_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}

/// Default level for an invocation
pub fn default_level(interactive: bool, has_log_file: bool) -> &'static str {
    match (interactive, has_log_file) {
        // The TUI owns the terminal; stderr output would land on the screen
        (true, false) => "off",
        (true, true) => "warn",
        (false, _) => "info",
    }
}
