//! ActiveBackup for Business collector.
//!
//! Reads `device_result_table` from the package's activity store and exports
//! the latest result of every backed-up device.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{BackupCollector, MetricDesc, MetricSample};
use crate::Result;
use crate::config::VariantOptions;
use crate::database::LogStore;
use crate::database::repositories::{DeviceResultRepository, SqlxDeviceResultRepository};
use crate::discovery::ACTIVE_BACKUP_ACTIVITY_DB;

/// Label carrying the device name.
pub const DEVICE_LABEL: &str = "device_name";

const NAMESPACE: &str = "ab_business_device_result";

struct DeviceMetrics {
    status: MetricDesc,
    time_start: MetricDesc,
    time_end: MetricDesc,
    transferred_bytes: MetricDesc,
}

impl DeviceMetrics {
    fn new() -> Self {
        let desc = |suffix: &str, help: &str| {
            MetricDesc::new(format!("{NAMESPACE}_{suffix}"), help, DEVICE_LABEL)
        };
        Self {
            status: desc("status", "Status of the latest device backup"),
            time_start: desc("time_start", "Start time for the latest device backup"),
            time_end: desc("time_end", "End time for the latest device backup"),
            transferred_bytes: desc(
                "transferred_bytes",
                "Amount of transferred bytes for the latest device backup",
            ),
        }
    }

    fn all(&self) -> Vec<MetricDesc> {
        vec![
            self.status.clone(),
            self.time_start.clone(),
            self.time_end.clone(),
            self.transferred_bytes.clone(),
        ]
    }
}

/// Collector for ActiveBackup for Business device backups.
pub struct ActiveBackupCollector<R = SqlxDeviceResultRepository> {
    repository: R,
    metrics: DeviceMetrics,
}

impl ActiveBackupCollector<SqlxDeviceResultRepository> {
    /// Open the activity store below `data_dir`.
    ///
    /// Fails with [`crate::Error::StoreUnavailable`] when the store is
    /// missing or unreadable, so the caller can skip this package.
    pub async fn new(data_dir: &Path, options: &VariantOptions) -> Result<Self> {
        let store = LogStore::open(data_dir.join(ACTIVE_BACKUP_ACTIVITY_DB)).await?;
        Ok(Self::with_repository(SqlxDeviceResultRepository::new(
            store,
            options.require_completed,
        )))
    }
}

impl<R: DeviceResultRepository> ActiveBackupCollector<R> {
    pub fn with_repository(repository: R) -> Self {
        Self {
            repository,
            metrics: DeviceMetrics::new(),
        }
    }
}

#[async_trait]
impl<R: DeviceResultRepository> BackupCollector for ActiveBackupCollector<R> {
    fn name(&self) -> &'static str {
        "active_backup"
    }

    fn describe(&self) -> Vec<MetricDesc> {
        self.metrics.all()
    }

    async fn collect(&self) -> Result<Vec<MetricSample>> {
        let results = self.repository.latest_device_results().await?;
        let m = &self.metrics;

        let mut samples = Vec::with_capacity(results.len() * 4);
        for res in &results {
            let device = res.device_name.as_str();
            samples.push(m.status.sample(device, res.status as f64));
            samples.push(m.time_start.sample(device, res.time_start as f64));
            samples.push(m.time_end.sample(device, res.time_end as f64));
            samples.push(
                m.transferred_bytes
                    .sample(device, res.transfered_bytes as f64),
            );
        }

        debug!(
            collector = self.name(),
            devices = results.len(),
            "Collected device results"
        );
        Ok(samples)
    }
}
