//! Exporter configuration.
//!
//! Values are resolved from built-in defaults, then `AB_EXPORTER_*`
//! environment variables (a `.env` file is honored by the binary), then
//! command-line flags.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default base directory holding the `@ActiveBackup*` folders.
pub const DEFAULT_DATA_DIR: &str = "/volume1";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 9763;

/// Per-subsystem options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOptions {
    /// Whether the subsystem may be loaded when its store is present.
    pub enabled: bool,
    /// Only consider executions with a non-zero end time when picking the
    /// latest row per entity.
    pub require_completed: bool,
}

impl VariantOptions {
    pub fn new(require_completed: bool) -> Self {
        Self {
            enabled: true,
            require_completed,
        }
    }
}

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Volume containing the ActiveBackup folders.
    pub data_dir: PathBuf,
    /// HTTP bind address.
    pub bind_address: String,
    /// HTTP port.
    pub port: u16,
    /// Log filter directive, used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Directory for rotated log files. Console only when unset.
    pub log_dir: Option<PathBuf>,
    /// ActiveBackup for Business.
    pub active_backup: VariantOptions,
    /// ActiveBackup for Google Workspace.
    pub gsuite: VariantOptions,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_filter: None,
            log_dir: None,
            active_backup: VariantOptions::new(true),
            // The GSuite log is read without the completed filter unless asked.
            gsuite: VariantOptions::new(false),
        }
    }
}

impl ExporterConfig {
    /// Load config from environment variables, falling back to defaults.
    ///
    /// Supported env vars:
    /// - `AB_EXPORTER_DATA_DIR`
    /// - `AB_EXPORTER_BIND_ADDRESS`
    /// - `AB_EXPORTER_PORT`
    /// - `AB_EXPORTER_LOG_FILTER`
    /// - `AB_EXPORTER_LOG_DIR`
    /// - `AB_EXPORTER_ACTIVE_BACKUP_REQUIRE_COMPLETED`
    /// - `AB_EXPORTER_GSUITE_REQUIRE_COMPLETED`
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("AB_EXPORTER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(bind_address) = non_empty("AB_EXPORTER_BIND_ADDRESS") {
            config.bind_address = bind_address;
        }

        if let Some(port) = non_empty("AB_EXPORTER_PORT")
            && let Ok(parsed) = port.trim().parse::<u16>()
        {
            config.port = parsed;
        }

        config.log_filter = non_empty("AB_EXPORTER_LOG_FILTER");
        config.log_dir = non_empty("AB_EXPORTER_LOG_DIR").map(PathBuf::from);

        if let Some(flag) =
            non_empty("AB_EXPORTER_ACTIVE_BACKUP_REQUIRE_COMPLETED").and_then(|v| parse_bool(&v))
        {
            config.active_backup.require_completed = flag;
        }

        if let Some(flag) =
            non_empty("AB_EXPORTER_GSUITE_REQUIRE_COMPLETED").and_then(|v| parse_bool(&v))
        {
            config.gsuite.require_completed = flag;
        }

        config
    }

    /// Reject configurations the exporter cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::config("data directory must not be empty"));
        }
        if self.port == 0 {
            return Err(Error::config("port must be non-zero"));
        }
        if !self.active_backup.enabled && !self.gsuite.enabled {
            return Err(Error::config("all subsystems are disabled"));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
