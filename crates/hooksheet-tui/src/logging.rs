//! Tracing setup for the binary
//!
//! While the cheat sheet owns the terminal, log lines go to a file so they
//! never land on the alternate screen. Print mode logs to stderr.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

use crate::error::TuiResult;

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Map a level name to a filter; unknown names fall back to `info`
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Install the global fmt subscriber
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init_logging(level: &str, target: &LogTarget) -> TuiResult<()> {
    let level = parse_level(level);

    let result = match target {
        LogTarget::Stderr => fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if let Err(e) = result {
        // another subscriber is already installed, e.g. by a test harness
        tracing::debug!("Keeping existing log subscriber: {}", e);
        return Ok(());
    }

    tracing::debug!(?target, %level, "Logging initialised");
    Ok(())
}
