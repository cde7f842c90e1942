//! Detection of installed ActiveBackup packages.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExporterConfig;

/// ActiveBackup for Business activity store, relative to the data dir.
pub const ACTIVE_BACKUP_ACTIVITY_DB: &str = "@ActiveBackup/activity.db";

/// ActiveBackup for Google Workspace task log store.
pub const GSUITE_LOG_DB: &str = "@ActiveBackup-GSuite/db/log.sqlite";

/// ActiveBackup for Google Workspace configuration store.
pub const GSUITE_CONFIG_DB: &str = "@ActiveBackup-GSuite/db/config.sqlite";

/// A backup package the exporter knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Subsystem {
    #[strum(to_string = "ActiveBackup for Business")]
    ActiveBackup,
    #[strum(to_string = "ActiveBackup for GSuite")]
    GSuite,
}

impl Subsystem {
    /// File whose presence means the package is installed.
    pub fn marker(self, data_dir: &Path) -> PathBuf {
        match self {
            Self::ActiveBackup => data_dir.join(ACTIVE_BACKUP_ACTIVITY_DB),
            Self::GSuite => data_dir.join(GSUITE_CONFIG_DB),
        }
    }

    pub fn is_installed(self, data_dir: &Path) -> bool {
        self.marker(data_dir).is_file()
    }

    fn enabled(self, config: &ExporterConfig) -> bool {
        match self {
            Self::ActiveBackup => config.active_backup.enabled,
            Self::GSuite => config.gsuite.enabled,
        }
    }
}

/// Installed and enabled packages below `config.data_dir`.
pub fn detect(config: &ExporterConfig) -> Vec<Subsystem> {
    use strum::IntoEnumIterator;

    Subsystem::iter()
        .filter(|subsystem| {
            if !subsystem.enabled(config) {
                info!(subsystem = %subsystem, "Disabled by configuration");
                return false;
            }
            let installed = subsystem.is_installed(&config.data_dir);
            if installed {
                info!(subsystem = %subsystem, "Found installation, loading module");
            } else {
                info!(
                    subsystem = %subsystem,
                    marker = %subsystem.marker(&config.data_dir).display(),
                    "Not installed"
                );
            }
            installed
        })
        .collect()
}
