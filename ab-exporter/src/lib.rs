//! Prometheus exporter for Synology ActiveBackup job results.
//!
//! Reads the SQLite logs written by ActiveBackup for Business and
//! ActiveBackup for Google Workspace and exposes the latest result of every
//! device or task as gauges.

pub mod api;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod database;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod metrics;

use std::sync::Arc;

use tracing::{info, warn};

pub use error::{Error, Result};

use crate::collectors::{ActiveBackupCollector, BackupCollector, GSuiteCollector};
use crate::config::ExporterConfig;
use crate::discovery::Subsystem;
use crate::metrics::CollectorRegistry;

/// Build a registry holding one collector per installed package.
///
/// A package whose stores cannot be opened is skipped with a warning.
/// Fails when no package could be registered.
pub async fn build_registry(config: &ExporterConfig) -> Result<CollectorRegistry> {
    let mut registry = CollectorRegistry::new();

    for subsystem in discovery::detect(config) {
        let collector: Result<Arc<dyn BackupCollector>> = match subsystem {
            Subsystem::ActiveBackup => {
                ActiveBackupCollector::new(&config.data_dir, &config.active_backup)
                    .await
                    .map(|c| Arc::new(c) as Arc<dyn BackupCollector>)
            }
            Subsystem::GSuite => GSuiteCollector::new(&config.data_dir, &config.gsuite)
                .await
                .map(|c| Arc::new(c) as Arc<dyn BackupCollector>),
        };

        match collector {
            Ok(collector) => {
                registry.register(collector)?;
                info!(subsystem = %subsystem, "Collector enabled");
            }
            Err(e) if e.is_store_unavailable() => {
                warn!(subsystem = %subsystem, error = %e, "Skipping package");
            }
            Err(e) => return Err(e),
        }
    }

    if registry.is_empty() {
        return Err(Error::config("no ActiveBackup software detected"));
    }

    Ok(registry)
}
