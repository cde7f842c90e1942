//! GSuite task result repository.
//!
//! Task executions live in the log store, task names in the config store.
//! The two are joined in the collector, not in SQL.

use async_trait::async_trait;
use sqlx::Connection;

use crate::Result;
use crate::database::LogStore;
use crate::database::models::{TaskNameDbModel, TaskResultDbModel};

const TASK_RESULT_COLUMNS: &str = r#"
    task_id,
    IFNULL(execution_status, 0) AS execution_status,
    IFNULL(error_code, 0) AS error_code,
    IFNULL(start_run_time, 0) AS start_run_time,
    IFNULL(end_run_time, 0) AS end_run_time,
    IFNULL(transfered_size, 0) AS transfered_size,
    IFNULL(drive_success_count, 0) AS drive_success_count,
    IFNULL(drive_warning_count, 0) AS drive_warning_count,
    IFNULL(drive_error_count, 0) AS drive_error_count,
    IFNULL(drive_transfered_size, 0) AS drive_transfered_size,
    IFNULL(teamdrive_success_count, 0) AS teamdrive_success_count,
    IFNULL(teamdrive_warning_count, 0) AS teamdrive_warning_count,
    IFNULL(teamdrive_error_count, 0) AS teamdrive_error_count,
    IFNULL(teamdrive_transfered_size, 0) AS teamdrive_transfered_size,
    IFNULL(mail_success_count, 0) AS mail_success_count,
    IFNULL(mail_warning_count, 0) AS mail_warning_count,
    IFNULL(mail_error_count, 0) AS mail_error_count,
    IFNULL(mail_transfered_size, 0) AS mail_transfered_size,
    IFNULL(contact_success_count, 0) AS contact_success_count,
    IFNULL(contact_warning_count, 0) AS contact_warning_count,
    IFNULL(contact_error_count, 0) AS contact_error_count,
    IFNULL(contact_transfered_size, 0) AS contact_transfered_size,
    IFNULL(calendar_success_count, 0) AS calendar_success_count,
    IFNULL(calendar_warning_count, 0) AS calendar_warning_count,
    IFNULL(calendar_error_count, 0) AS calendar_error_count,
    IFNULL(calendar_transfered_size, 0) AS calendar_transfered_size
"#;

const TASK_NAMES_SQL: &str =
    "SELECT task_id, IFNULL(task_name, '') AS task_name FROM task_info_table";

/// GSuite task repository trait.
#[async_trait]
pub trait TaskResultRepository: Send + Sync {
    /// One row per task: the one with the highest `job_execution_id`.
    async fn latest_task_results(&self) -> Result<Vec<TaskResultDbModel>>;

    /// All declared task names.
    async fn task_names(&self) -> Result<Vec<TaskNameDbModel>>;
}

/// SQLx implementation of TaskResultRepository.
pub struct SqlxTaskResultRepository {
    log_store: LogStore,
    config_store: LogStore,
    latest_sql: String,
}

impl SqlxTaskResultRepository {
    pub fn new(log_store: LogStore, config_store: LogStore, require_completed: bool) -> Self {
        let completed_filter = if require_completed {
            "WHERE end_run_time != 0"
        } else {
            ""
        };
        let latest_sql = format!(
            "SELECT {TASK_RESULT_COLUMNS} FROM job_log_table \
             WHERE job_execution_id IN ( \
                 SELECT MAX(job_execution_id) FROM job_log_table {completed_filter} GROUP BY task_id \
             ) \
             ORDER BY task_id"
        );

        Self {
            log_store,
            config_store,
            latest_sql,
        }
    }
}

#[async_trait]
impl TaskResultRepository for SqlxTaskResultRepository {
    async fn latest_task_results(&self) -> Result<Vec<TaskResultDbModel>> {
        let mut conn = self.log_store.connect().await?;
        let results = sqlx::query_as::<_, TaskResultDbModel>(&self.latest_sql)
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;
        Ok(results)
    }

    async fn task_names(&self) -> Result<Vec<TaskNameDbModel>> {
        let mut conn = self.config_store.connect().await?;
        let names = sqlx::query_as::<_, TaskNameDbModel>(TASK_NAMES_SQL)
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;
        Ok(names)
    }
}
