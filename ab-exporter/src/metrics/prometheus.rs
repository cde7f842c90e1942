//! Prometheus metrics exporter.
//!
//! Exports gathered samples in the Prometheus text format (version 0.0.4).

use std::collections::HashMap;
use std::fmt::Write;

use super::registry::Gathered;
use crate::collectors::MetricSample;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Whether a collector's last collection succeeded.
pub const COLLECTOR_UP_METRIC: &str = "ab_exporter_collector_up";

/// How long a collector's last collection took.
pub const COLLECTOR_DURATION_METRIC: &str = "ab_exporter_collector_duration_seconds";

/// Prometheus metrics exporter.
#[derive(Debug, Default, Clone)]
pub struct PrometheusExporter;

impl PrometheusExporter {
    pub fn new() -> Self {
        Self
    }

    /// Render `gathered` in text format.
    ///
    /// Every described metric gets its HELP/TYPE header, even when no entity
    /// produced a sample this time.
    pub fn encode(&self, gathered: &Gathered) -> String {
        let mut output = String::new();

        for scrape in &gathered.scrapes {
            let mut by_name: HashMap<&str, Vec<&MetricSample>> = HashMap::new();
            for sample in scrape.samples() {
                by_name.entry(sample.name.as_str()).or_default().push(sample);
            }

            for desc in scrape.descs.iter() {
                self.write_header(&mut output, desc.name(), desc.help());
                for sample in by_name.remove(desc.name()).unwrap_or_default() {
                    self.write_sample(
                        &mut output,
                        &sample.name,
                        &[(sample.label_name, &sample.label_value)],
                        sample.value,
                    );
                }
            }

            if !by_name.is_empty() {
                tracing::warn!(
                    collector = scrape.collector,
                    undeclared = ?by_name.keys().collect::<Vec<_>>(),
                    "Dropping samples for undeclared metrics"
                );
            }
        }

        // Exporter metrics
        self.write_header(
            &mut output,
            COLLECTOR_UP_METRIC,
            "Whether the last collection of the backup collector succeeded (1 = success, 0 = failure)",
        );
        for scrape in &gathered.scrapes {
            self.write_sample(
                &mut output,
                COLLECTOR_UP_METRIC,
                &[("collector", scrape.collector)],
                if scrape.is_success() { 1.0 } else { 0.0 },
            );
        }

        self.write_header(
            &mut output,
            COLLECTOR_DURATION_METRIC,
            "Duration of the last collection of the backup collector in seconds",
        );
        for scrape in &gathered.scrapes {
            self.write_sample(
                &mut output,
                COLLECTOR_DURATION_METRIC,
                &[("collector", scrape.collector)],
                scrape.duration.as_secs_f64(),
            );
        }

        output
    }

    fn write_header(&self, output: &mut String, name: &str, help: &str) {
        let _ = writeln!(output, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(output, "# TYPE {} gauge", name);
    }

    fn write_sample(&self, output: &mut String, name: &str, labels: &[(&str, &str)], value: f64) {
        let labels_str = labels
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
            .collect::<Vec<_>>()
            .join(",");

        let _ = writeln!(output, "{}{{{}}} {}", name, labels_str, format_value(value));
    }
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}
