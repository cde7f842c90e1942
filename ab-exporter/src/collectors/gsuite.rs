//! ActiveBackup for Google Workspace (GSuite) collector.
//!
//! Task executions come from `job_log_table` in the log store and are
//! labeled with the task name declared in the config store's
//! `task_info_table`.

use std::path::Path;

use async_trait::async_trait;
use strum::IntoEnumIterator;
use tracing::debug;

use super::{BackupCollector, MetricDesc, MetricSample, TaskNameMap};
use crate::Result;
use crate::config::VariantOptions;
use crate::database::LogStore;
use crate::database::models::Category;
use crate::database::repositories::{SqlxTaskResultRepository, TaskResultRepository};
use crate::discovery::{GSUITE_CONFIG_DB, GSUITE_LOG_DB};

/// Label carrying the task name.
pub const TASK_LABEL: &str = "task_name";

const NAMESPACE: &str = "ab_gsuite";

struct TaskMetrics {
    status: MetricDesc,
    error_code: MetricDesc,
    time_start: MetricDesc,
    time_end: MetricDesc,
    transferred_bytes: MetricDesc,
}

struct CategoryMetrics {
    category: Category,
    success_count: MetricDesc,
    warning_count: MetricDesc,
    error_count: MetricDesc,
    transferred_bytes: MetricDesc,
}

impl CategoryMetrics {
    fn new(category: Category) -> Self {
        let items = category.items();
        let desc = |suffix: &str, help: String| {
            MetricDesc::new(format!("{NAMESPACE}_{category}_{suffix}"), help, TASK_LABEL)
        };
        Self {
            category,
            success_count: desc(
                "success_count",
                format!("Number of {items} backed up successfully by the latest task"),
            ),
            warning_count: desc(
                "warning_count",
                format!("Number of {items} backed up with warnings by the latest task"),
            ),
            error_count: desc(
                "error_count",
                format!("Number of {items} backed up with errors by the latest task"),
            ),
            transferred_bytes: desc(
                "transferred_bytes",
                format!("Amount of transferred bytes for {items} in the latest task"),
            ),
        }
    }
}

/// Collector for ActiveBackup for Google Workspace tasks.
pub struct GSuiteCollector<R = SqlxTaskResultRepository> {
    repository: R,
    task: TaskMetrics,
    categories: Vec<CategoryMetrics>,
}

impl GSuiteCollector<SqlxTaskResultRepository> {
    /// Open the log and config stores below `data_dir`.
    ///
    /// Fails with [`crate::Error::StoreUnavailable`] when either store is
    /// missing or unreadable.
    pub async fn new(data_dir: &Path, options: &VariantOptions) -> Result<Self> {
        let log_store = LogStore::open(data_dir.join(GSUITE_LOG_DB)).await?;
        let config_store = LogStore::open(data_dir.join(GSUITE_CONFIG_DB)).await?;
        Ok(Self::with_repository(SqlxTaskResultRepository::new(
            log_store,
            config_store,
            options.require_completed,
        )))
    }
}

impl<R: TaskResultRepository> GSuiteCollector<R> {
    pub fn with_repository(repository: R) -> Self {
        let desc = |suffix: &str, help: &str| {
            MetricDesc::new(format!("{NAMESPACE}_task_result_{suffix}"), help, TASK_LABEL)
        };
        Self {
            repository,
            task: TaskMetrics {
                status: desc("status", "Status of the latest task execution"),
                error_code: desc("error_code", "Error code of the latest task execution"),
                time_start: desc("time_start", "Start time for the latest task execution"),
                time_end: desc("time_end", "End time for the latest task execution"),
                transferred_bytes: desc(
                    "transferred_bytes",
                    "Total amount of transferred bytes for the latest task execution",
                ),
            },
            categories: Category::iter().map(CategoryMetrics::new).collect(),
        }
    }
}

#[async_trait]
impl<R: TaskResultRepository> BackupCollector for GSuiteCollector<R> {
    fn name(&self) -> &'static str {
        "gsuite"
    }

    fn describe(&self) -> Vec<MetricDesc> {
        let t = &self.task;
        let mut descs = vec![
            t.status.clone(),
            t.error_code.clone(),
            t.time_start.clone(),
            t.time_end.clone(),
            t.transferred_bytes.clone(),
        ];
        for c in &self.categories {
            descs.extend([
                c.success_count.clone(),
                c.warning_count.clone(),
                c.error_count.clone(),
                c.transferred_bytes.clone(),
            ]);
        }
        descs
    }

    async fn collect(&self) -> Result<Vec<MetricSample>> {
        // Names are reloaded every scrape so renamed tasks show up at once.
        let (names, results) = tokio::try_join!(
            self.repository.task_names(),
            self.repository.latest_task_results(),
        )?;
        let names: TaskNameMap = names.into_iter().collect();

        let t = &self.task;
        let per_task = 5 + 4 * self.categories.len();
        let mut samples = Vec::with_capacity(results.len() * per_task);

        let task_ids: Vec<i64> = results.iter().map(|res| res.task_id).collect();
        let task_names = names.resolve_unique(&task_ids);

        for (res, task_name) in results.iter().zip(&task_names) {
            let task = task_name.as_str();

            samples.push(t.status.sample(task, res.execution_status as f64));
            samples.push(t.error_code.sample(task, res.error_code as f64));
            samples.push(t.time_start.sample(task, res.start_run_time as f64));
            samples.push(t.time_end.sample(task, res.end_run_time as f64));
            samples.push(t.transferred_bytes.sample(task, res.transfered_size as f64));

            for c in &self.categories {
                let counts = res.category(c.category);
                samples.push(c.success_count.sample(task, counts.success as f64));
                samples.push(c.warning_count.sample(task, counts.warning as f64));
                samples.push(c.error_count.sample(task, counts.error as f64));
                samples.push(c.transferred_bytes.sample(task, counts.transfered_size as f64));
            }
        }

        debug!(
            collector = self.name(),
            tasks = results.len(),
            named = names.len(),
            "Collected task results"
        );
        Ok(samples)
    }
}
