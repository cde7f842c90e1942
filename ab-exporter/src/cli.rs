//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ExporterConfig;

/// Prometheus exporter for Synology Active Backup job results.
#[derive(Debug, Parser)]
#[command(name = "ab-exporter", version, about)]
pub struct Args {
    /// Path to the volume containing the ActiveBackup folders
    #[arg(long = "dir", value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Listening port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind_address: Option<String>,

    /// Log filter directive (e.g. "ab_exporter=debug,sqlx=warn")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Write daily-rotated log files into this directory
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Never load the ActiveBackup for Business collector
    #[arg(long)]
    pub disable_active_backup: bool,

    /// Never load the ActiveBackup for Google Workspace collector
    #[arg(long)]
    pub disable_gsuite: bool,

    /// Ignore unfinished device backups when picking the latest result
    #[arg(long, value_name = "BOOL")]
    pub active_backup_require_completed: Option<bool>,

    /// Ignore unfinished GSuite tasks when picking the latest result
    #[arg(long, value_name = "BOOL")]
    pub gsuite_require_completed: Option<bool>,
}

impl Args {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(self, mut config: ExporterConfig) -> ExporterConfig {
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind_address) = self.bind_address {
            config.bind_address = bind_address;
        }
        if self.log_filter.is_some() {
            config.log_filter = self.log_filter;
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
        if self.disable_active_backup {
            config.active_backup.enabled = false;
        }
        if self.disable_gsuite {
            config.gsuite.enabled = false;
        }
        if let Some(flag) = self.active_backup_require_completed {
            config.active_backup.require_completed = flag;
        }
        if let Some(flag) = self.gsuite_require_completed {
            config.gsuite.require_completed = flag;
        }
        config
    }
}
