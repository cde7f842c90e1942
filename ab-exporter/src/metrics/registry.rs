//! Registry of backup collectors.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, error};

use super::prometheus::{COLLECTOR_DURATION_METRIC, COLLECTOR_UP_METRIC};
use crate::collectors::{BackupCollector, MetricDesc, MetricSample};
use crate::{Error, Result};

struct Registered {
    collector: Arc<dyn BackupCollector>,
    descs: Arc<[MetricDesc]>,
}

/// Holds the registered collectors and runs them on every scrape.
///
/// Descriptors are captured once at registration. Metric names must be
/// unique across all collectors.
#[derive(Default)]
pub struct CollectorRegistry {
    collectors: Vec<Registered>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector after checking its descriptors.
    pub fn register(&mut self, collector: Arc<dyn BackupCollector>) -> Result<()> {
        let descs: Arc<[MetricDesc]> = collector.describe().into();

        let mut taken: HashSet<&str> = self
            .collectors
            .iter()
            .flat_map(|r| r.descs.iter().map(|d| d.name()))
            .collect();
        taken.insert(COLLECTOR_UP_METRIC);
        taken.insert(COLLECTOR_DURATION_METRIC);

        for desc in descs.iter() {
            if !taken.insert(desc.name()) {
                return Err(Error::duplicate_metric(desc.name()));
            }
        }

        debug!(
            collector = collector.name(),
            metrics = descs.len(),
            "Collector registered"
        );
        self.collectors.push(Registered { collector, descs });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Names of the registered collectors, in registration order.
    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|r| r.collector.name()).collect()
    }

    /// Every registered descriptor.
    pub fn descriptors(&self) -> impl Iterator<Item = &MetricDesc> {
        self.collectors.iter().flat_map(|r| r.descs.iter())
    }

    /// Run every collector concurrently.
    ///
    /// A failing collector is logged and reported in its [`CollectorScrape`];
    /// it never affects the others.
    pub async fn gather(&self) -> Gathered {
        let scrapes = join_all(self.collectors.iter().map(|registered| async move {
            let name = registered.collector.name();
            let started = Instant::now();
            let outcome = registered.collector.collect().await;
            let duration = started.elapsed();

            match &outcome {
                Ok(samples) => debug!(
                    collector = name,
                    samples = samples.len(),
                    duration_ms = duration.as_millis() as u64,
                    "Collection finished"
                ),
                Err(e) => error!(collector = name, error = %e, "Collection failed"),
            }

            CollectorScrape {
                collector: name,
                descs: registered.descs.clone(),
                outcome,
                duration,
            }
        }))
        .await;

        Gathered { scrapes }
    }
}

/// Result of running one collector.
pub struct CollectorScrape {
    pub collector: &'static str,
    pub descs: Arc<[MetricDesc]>,
    pub outcome: Result<Vec<MetricSample>>,
    pub duration: Duration,
}

impl CollectorScrape {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Samples of a successful collection, empty otherwise.
    pub fn samples(&self) -> &[MetricSample] {
        match &self.outcome {
            Ok(samples) => samples.as_slice(),
            Err(_) => &[],
        }
    }
}

/// Result of one registry-wide gather.
pub struct Gathered {
    pub scrapes: Vec<CollectorScrape>,
}

impl Gathered {
    /// True when at least one collector ran and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.scrapes.is_empty() && self.scrapes.iter().all(|s| !s.is_success())
    }

    pub fn samples(&self) -> impl Iterator<Item = &MetricSample> {
        self.scrapes.iter().flat_map(|s| s.samples().iter())
    }
}
