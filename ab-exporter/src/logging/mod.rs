//! Logging setup.
//!
//! This module provides:
//! - An `EnvFilter` resolved from `RUST_LOG`, the configured directive, or a default
//! - Console output with local timezone timestamps
//! - Optional daily-rotated log files

use std::path::PathBuf;

use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ExporterConfig;

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "ab_exporter=info,sqlx=warn,tower_http=info";

/// File name prefix of rotated log files.
const LOG_FILE_PREFIX: &str = "ab-exporter.log";

/// Timer that formats timestamps in the server's local timezone.
#[derive(Debug, Clone, Copy)]
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: Option<String>,
    /// Directory for rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl From<&ExporterConfig> for LoggingOptions {
    fn from(config: &ExporterConfig) -> Self {
        Self {
            filter: config.log_filter.clone(),
            log_dir: config.log_dir.clone(),
        }
    }
}

/// Pick the filter directive: `RUST_LOG`, then the configured one, then the default.
pub fn resolve_filter(env_directive: Option<String>, configured: Option<&str>) -> String {
    env_directive
        .filter(|d| !d.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Initialize the global subscriber.
///
/// # Returns
/// The file writer guard when file logging is enabled; keep it alive for the
/// process lifetime so buffered lines are flushed.
pub fn init_logging(options: &LoggingOptions) -> crate::Result<Option<WorkerGuard>> {
    let directive = resolve_filter(std::env::var("RUST_LOG").ok(), options.filter.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| crate::Error::config(format!("Invalid log filter '{}': {}", directive, e)))?;

    let (file_layer, guard) = match &options.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_timer(LocalTimer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(true).with_timer(LocalTimer))
        .with(file_layer)
        .try_init()
        .map_err(|e| {
            crate::Error::Other(format!("Failed to set global default subscriber: {}", e))
        })?;

    Ok(guard)
}
