//! Logging Infrastructure
//!
//! Console logging plus an optional daily rotating JSON log file.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level used when `RUST_LOG` is not set (e.g., "info", "debug")
/// * `json_format` - JSON console output instead of human-readable lines
/// * `log_dir` - Optional directory for daily rotating `label-station.YYYY-MM-DD` files
///
/// Console output goes to stderr so dry-run scripts on stdout stay clean.
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let json_layer = json_format.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json_format).then(|| {
        fmt::layer()
            .with_target(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
    });

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "label-station");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(appender)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
