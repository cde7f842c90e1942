//! Shared fixtures: ActiveBackup log stores laid out below a temp data dir.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ab_exporter::collectors::MetricSample;
use ab_exporter::discovery::{ACTIVE_BACKUP_ACTIVITY_DB, GSUITE_CONFIG_DB, GSUITE_LOG_DB};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;

const DEVICE_RESULT_SCHEMA: &str = r#"
    CREATE TABLE device_result_table (
        device_result_id INTEGER PRIMARY KEY,
        device_name TEXT,
        status INTEGER,
        time_start INTEGER,
        time_end INTEGER,
        transfered_bytes INTEGER
    )
"#;

const JOB_LOG_SCHEMA: &str = r#"
    CREATE TABLE job_log_table (
        job_execution_id INTEGER PRIMARY KEY,
        task_id INTEGER NOT NULL,
        execution_status INTEGER,
        error_code INTEGER,
        start_run_time INTEGER,
        end_run_time INTEGER,
        transfered_size INTEGER,
        drive_success_count INTEGER,
        drive_warning_count INTEGER,
        drive_error_count INTEGER,
        drive_transfered_size INTEGER,
        teamdrive_success_count INTEGER,
        teamdrive_warning_count INTEGER,
        teamdrive_error_count INTEGER,
        teamdrive_transfered_size INTEGER,
        mail_success_count INTEGER,
        mail_warning_count INTEGER,
        mail_error_count INTEGER,
        mail_transfered_size INTEGER,
        contact_success_count INTEGER,
        contact_warning_count INTEGER,
        contact_error_count INTEGER,
        contact_transfered_size INTEGER,
        calendar_success_count INTEGER,
        calendar_warning_count INTEGER,
        calendar_error_count INTEGER,
        calendar_transfered_size INTEGER
    )
"#;

const TASK_INFO_SCHEMA: &str = r#"
    CREATE TABLE task_info_table (
        task_id INTEGER PRIMARY KEY,
        task_name TEXT
    )
"#;

/// One `job_log_table` row. Category columns are `[success, warning, error, bytes]`
/// in drive, teamdrive, mail, contact, calendar order.
#[derive(Debug, Clone, Default)]
pub struct TaskRun {
    pub job_execution_id: i64,
    pub task_id: i64,
    pub execution_status: i64,
    pub error_code: Option<i64>,
    pub start_run_time: i64,
    pub end_run_time: i64,
    pub transfered_size: i64,
    pub categories: [[i64; 4]; 5],
}

/// A temp data dir standing in for `/volume1`.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create the ActiveBackup for Business activity store.
    pub async fn create_active_backup(&self) {
        create_store(&self.store_path(ACTIVE_BACKUP_ACTIVITY_DB), DEVICE_RESULT_SCHEMA).await;
    }

    /// Create both GSuite stores.
    pub async fn create_gsuite(&self) {
        create_store(&self.store_path(GSUITE_LOG_DB), JOB_LOG_SCHEMA).await;
        create_store(&self.store_path(GSUITE_CONFIG_DB), TASK_INFO_SCHEMA).await;
    }

    pub async fn insert_device_result(
        &self,
        id: i64,
        device_name: &str,
        status: i64,
        time_start: i64,
        time_end: i64,
        bytes: i64,
    ) {
        let mut conn = writer(&self.store_path(ACTIVE_BACKUP_ACTIVITY_DB)).await;
        sqlx::query(
            "INSERT INTO device_result_table \
             (device_result_id, device_name, status, time_start, time_end, transfered_bytes) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(device_name)
        .bind(status)
        .bind(time_start)
        .bind(time_end)
        .bind(bytes)
        .execute(&mut conn)
        .await
        .expect("Failed to insert device result");
        conn.close().await.expect("Failed to close writer");
    }

    /// Insert a device result whose `device_name` is NULL.
    pub async fn insert_null_device_result(
        &self,
        id: i64,
        status: i64,
        time_start: i64,
        time_end: i64,
        bytes: i64,
    ) {
        let mut conn = writer(&self.store_path(ACTIVE_BACKUP_ACTIVITY_DB)).await;
        sqlx::query(
            "INSERT INTO device_result_table \
             (device_result_id, device_name, status, time_start, time_end, transfered_bytes) \
             VALUES (?, NULL, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(status)
        .bind(time_start)
        .bind(time_end)
        .bind(bytes)
        .execute(&mut conn)
        .await
        .expect("Failed to insert device result");
        conn.close().await.expect("Failed to close writer");
    }

    pub async fn insert_task_run(&self, run: &TaskRun) {
        let mut conn = writer(&self.store_path(GSUITE_LOG_DB)).await;
        let mut query = sqlx::query(
            "INSERT INTO job_log_table VALUES \
             (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(run.job_execution_id)
        .bind(run.task_id)
        .bind(run.execution_status)
        .bind(run.error_code)
        .bind(run.start_run_time)
        .bind(run.end_run_time)
        .bind(run.transfered_size);
        for counts in run.categories {
            for value in counts {
                query = query.bind(value);
            }
        }
        query
            .execute(&mut conn)
            .await
            .expect("Failed to insert task run");
        conn.close().await.expect("Failed to close writer");
    }

    pub async fn insert_task_name(&self, task_id: i64, task_name: Option<&str>) {
        let mut conn = writer(&self.store_path(GSUITE_CONFIG_DB)).await;
        sqlx::query("INSERT OR REPLACE INTO task_info_table (task_id, task_name) VALUES (?, ?)")
            .bind(task_id)
            .bind(task_name)
            .execute(&mut conn)
            .await
            .expect("Failed to insert task name");
        conn.close().await.expect("Failed to close writer");
    }
}

async fn writer(path: &Path) -> SqliteConnection {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .expect("Failed to open writer connection")
}

async fn create_store(path: &Path, schema: &str) {
    std::fs::create_dir_all(path.parent().expect("store path has a parent"))
        .expect("Failed to create store dir");
    let mut conn = writer(path).await;
    sqlx::query(schema)
        .execute(&mut conn)
        .await
        .expect("Failed to create schema");
    conn.close().await.expect("Failed to close writer");
}

/// Value of the sample `name{label}`, if emitted.
pub fn sample_value(samples: &[MetricSample], name: &str, label: &str) -> Option<f64> {
    samples
        .iter()
        .find(|s| s.name == name && s.label_value == label)
        .map(|s| s.value)
}

/// Distinct label values among `samples`.
pub fn labels(samples: &[MetricSample]) -> Vec<String> {
    let mut labels: Vec<String> = samples.iter().map(|s| s.label_value.clone()).collect();
    labels.sort();
    labels.dedup();
    labels
}
