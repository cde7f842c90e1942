//! Exporter-wide error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Exporter-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Exporter-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The log store file is missing or cannot be opened read-only.
    #[error("Log store unavailable at {}: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// A query against an opened log store failed.
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Duplicate metric name registered: {name}")]
    DuplicateMetric { name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn store_unavailable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn duplicate_metric(name: impl Into<String>) -> Self {
        Self::DuplicateMetric { name: name.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this error means the subsystem should be skipped rather than
    /// treated as fatal.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}
