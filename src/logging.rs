//! Structured-logging glue.
//!
//! The client itself only emits `tracing` events; installing a subscriber
//! is the embedding application's call. These helpers cover the two common
//! setups: stderr, and a rolling log file. In both, `debug_mode` picks the
//! default filter - `debug` makes the errors swallowed by
//! [`QuietClient`](crate::QuietClient) visible, `warn` keeps them silent.
//! An explicit `RUST_LOG` always wins over the default.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Prefix of the rolled log files.
const LOG_FILE_PREFIX: &str = "glpi-client.log";

fn default_filter(config: &Config) -> EnvFilter {
    let fallback = if config.debug_mode {
        "glpi_client=debug"
    } else {
        "glpi_client=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a stderr subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(config: &Config) {
    fmt()
        .with_env_filter(default_filter(config))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Installs a subscriber writing to a daily-rolling file in `directory`.
///
/// Writing is non-blocking; the returned guard flushes buffered lines on
/// drop and must be held for the lifetime of the application.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_with_file(config: &Config, directory: impl AsRef<Path>) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(default_filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}
