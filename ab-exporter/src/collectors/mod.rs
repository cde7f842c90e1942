//! Backup result collectors.
//!
//! A collector turns the latest execution per entity of one backup package
//! into labeled gauge samples. Each collector has two operations:
//!
//! - [`BackupCollector::describe`] returns the fixed descriptor set, built
//!   once at construction.
//! - [`BackupCollector::collect`] queries the log store afresh and emits one
//!   sample per descriptor per entity found.
//!
//! Collectors hold no per-scrape state, so `collect` may run concurrently.

mod active_backup;
mod gsuite;
mod task_names;

pub use active_backup::{ActiveBackupCollector, DEVICE_LABEL};
pub use gsuite::{GSuiteCollector, TASK_LABEL};
pub use task_names::TaskNameMap;

use async_trait::async_trait;

use crate::Result;

/// Identity of one exported metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricDesc {
    name: String,
    help: String,
    label_name: &'static str,
}

impl MetricDesc {
    pub fn new(name: impl Into<String>, help: impl Into<String>, label_name: &'static str) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            label_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The single label every sample of this metric carries.
    pub fn label_name(&self) -> &'static str {
        self.label_name
    }

    /// Build a sample of this metric for one entity.
    pub fn sample(&self, label_value: impl Into<String>, value: f64) -> MetricSample {
        MetricSample {
            name: self.name.clone(),
            label_name: self.label_name,
            label_value: label_value.into(),
            value,
        }
    }
}

/// One gauge value for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    pub label_name: &'static str,
    pub label_value: String,
    pub value: f64,
}

/// Capability shared by every backup package collector.
#[async_trait]
pub trait BackupCollector: Send + Sync {
    /// Short identifier, used as the `collector` label of exporter metrics.
    fn name(&self) -> &'static str;

    /// The full descriptor set. Identical on every call.
    fn describe(&self) -> Vec<MetricDesc>;

    /// Read the latest executions and emit their samples.
    async fn collect(&self) -> Result<Vec<MetricSample>>;
}
