//! In-process counters, reported through tracing

use std::sync::atomic::{AtomicU64, Ordering};

use crate::client::ChartResults;

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    batches_run: AtomicU64,
    charts_fetched: AtomicU64,
    charts_failed: AtomicU64,
    geocode_lookups: AtomicU64,
    geocode_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed fetch batch
    pub fn batch_completed(&self, results: &ChartResults) {
        let failed = results.failed() as u64;
        let fetched = results.len() as u64 - failed;

        self.batches_run.fetch_add(1, Ordering::Relaxed);
        self.charts_fetched.fetch_add(fetched, Ordering::Relaxed);
        self.charts_failed.fetch_add(failed, Ordering::Relaxed);
        tracing::debug!(
            counter = "charts",
            fetched,
            failed,
            "Metric incremented"
        );
    }

    pub fn geocode_lookup(&self, succeeded: bool) {
        self.geocode_lookups.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.geocode_failures.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(counter = "geocode_lookups", succeeded, "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_run: self.batches_run.load(Ordering::Relaxed),
            charts_fetched: self.charts_fetched.load(Ordering::Relaxed),
            charts_failed: self.charts_failed.load(Ordering::Relaxed),
            geocode_lookups: self.geocode_lookups.load(Ordering::Relaxed),
            geocode_failures: self.geocode_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub batches_run: u64,
    pub charts_fetched: u64,
    pub charts_failed: u64,
    pub geocode_lookups: u64,
    pub geocode_failures: u64,
}
