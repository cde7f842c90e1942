//! Collector registry and Prometheus exposition.
//!
//! # Example
//!
//! ```ignore
//! use ab_exporter::metrics::{CollectorRegistry, PrometheusExporter};
//!
//! let mut registry = CollectorRegistry::new();
//! registry.register(Arc::new(collector))?;
//!
//! let gathered = registry.gather().await;
//! let body = PrometheusExporter::new().encode(&gathered);
//! ```

mod prometheus;
mod registry;

pub use prometheus::{
    COLLECTOR_DURATION_METRIC, COLLECTOR_UP_METRIC, CONTENT_TYPE, PrometheusExporter,
};
pub use registry::{CollectorRegistry, CollectorScrape, Gathered};
