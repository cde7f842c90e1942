//! Read-only access to the ActiveBackup log stores.
//!
//! The stores are SQLite files owned and written by the backup packages.
//! Every query opens its own read-only connection so that concurrent scrapes
//! never share a handle and a store replaced between scrapes is picked up.

pub mod models;
pub mod repositories;

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

use crate::{Error, Result};

/// How long a reader waits on a lock held by the backup package.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// A SQLite log store identified by its path.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// Describe a store without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a store and verify it is a readable SQLite database.
    ///
    /// Fails with [`Error::StoreUnavailable`] when the file is missing or
    /// cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.probe().await?;
        Ok(store)
    }

    /// Open a fresh read-only connection.
    pub async fn connect(&self) -> Result<SqliteConnection> {
        if !self.path.is_file() {
            return Err(Error::store_unavailable(&self.path, "file not found"));
        }

        SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
            .connect()
            .await
            .map_err(|e| Error::store_unavailable(&self.path, e.to_string()))
    }

    /// Check the store can be opened and its schema read.
    pub async fn probe(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        // SQLite opens arbitrary files lazily; reading the schema catches
        // files that are not databases.
        let tables: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&mut conn)
            .await
            .map_err(|e| Error::store_unavailable(&self.path, e.to_string()))?;
        conn.close().await?;

        debug!(path = %self.path.display(), tables, "Log store probed");
        Ok(())
    }
}
