//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::{data_dir, expand_tilde};
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log file name inside the data directory.
const LOG_FILE_NAME: &str = "kinoteka.log";

/// Installs the global subscriber: an [`EnvFilter`] and a JSON `fmt` layer
/// writing to a rotating log file.
///
/// # Level Resolution
///
/// 1. `RUST_LOG`, if set and valid
/// 2. `config.trace_level`
/// 3. `"info"`
///
/// # File Location
///
/// `config.log_file` if set, otherwise `kinoteka.log` in
/// [`data_dir`](crate::infrastructure::data_dir). Stdout is never written to.
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently does nothing if that fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use kinoteka::observability::init_tracing;
/// use kinoteka::Config;
///
/// let dir = std::env::temp_dir().join("kinoteka-doc");
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     log_file: Some(dir.join("session.log").display().to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = log_file_path(config);
    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(FileWriter::new(log_file));

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn log_file_path(config: &Config) -> PathBuf {
    config
        .log_file
        .as_deref()
        .map_or_else(|| data_dir().join(LOG_FILE_NAME), expand_tilde)
}
