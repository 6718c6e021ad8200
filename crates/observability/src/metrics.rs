//! Endpoint metrics publishing
//!
//! Pushes `rlog` endpoint counters through the `metrics` facade and builds
//! printable summaries.

use metrics::{counter, gauge};
use rlog::MetricsSnapshot;

/// Publish one endpoint's counters
///
/// Counters are set to the snapshot's absolute values, so repeated calls
/// with growing snapshots are safe.
pub fn record_endpoint_metrics(endpoint: &str, snapshot: &MetricsSnapshot) {
    counter!("rlog_endpoint_writes_total", "endpoint" => endpoint.to_string())
        .absolute(snapshot.write_count);
    counter!("rlog_endpoint_failures_total", "endpoint" => endpoint.to_string())
        .absolute(snapshot.failure_count);
    counter!("rlog_endpoint_bytes_total", "endpoint" => endpoint.to_string())
        .absolute(snapshot.bytes_written);
}

/// Publish every endpoint of a logger
pub fn record_logger_metrics(metrics: &[(String, MetricsSnapshot)]) {
    for (name, snapshot) in metrics {
        record_endpoint_metrics(name, snapshot);
    }
    gauge!("rlog_endpoints").set(metrics.len() as f64);
}

/// Per-endpoint totals plus an overall line
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub endpoints: Vec<(String, MetricsSnapshot)>,
    pub total_writes: u64,
    pub total_failures: u64,
    pub total_bytes: u64,
}

impl MetricsSummary {
    pub fn from_snapshots(metrics: &[(String, MetricsSnapshot)]) -> Self {
        let mut summary = Self {
            endpoints: metrics.to_vec(),
            ..Default::default()
        };
        for (_, snapshot) in metrics {
            summary.total_writes += snapshot.write_count;
            summary.total_failures += snapshot.failure_count;
            summary.total_bytes += snapshot.bytes_written;
        }
        summary
    }

    /// Share of attempted writes that failed, in percent
    pub fn failure_rate(&self) -> f64 {
        let attempts = self.total_writes + self.total_failures;
        if attempts == 0 {
            0.0
        } else {
            self.total_failures as f64 / attempts as f64 * 100.0
        }
    }
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Endpoint Metrics ===")?;
        for (name, snapshot) in &self.endpoints {
            writeln!(
                f,
                "  {name}: writes={} failures={} bytes={}",
                snapshot.write_count, snapshot.failure_count, snapshot.bytes_written
            )?;
        }
        writeln!(
            f,
            "Total: writes={} failures={} ({:.2}%) bytes={}",
            self.total_writes,
            self.total_failures,
            self.failure_rate(),
            self.total_bytes
        )
    }
}
