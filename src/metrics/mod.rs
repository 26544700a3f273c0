//! Basic metrics instrumentation for a pipeline run.
//!
//! Counts outbound HTTP calls and per-document outcomes so a batch command can
//! log a one-line summary when it finishes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the clients and the pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    http_requests_total: Arc<AtomicU64>,
    http_errors_total: Arc<AtomicU64>,
    http_duration_total_ms: Arc<AtomicU64>,

    /// Images sent to the model and stored
    documents_extracted_total: Arc<AtomicU64>,

    /// Images skipped because an output file already existed
    documents_skipped_total: Arc<AtomicU64>,

    /// Stored records that are parse-failure markers
    parse_failures_total: Arc<AtomicU64>,

    /// Rows accepted by the bulk endpoint
    documents_indexed_total: Arc<AtomicU64>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stored extraction; `parse_failed` marks an error record.
    pub fn record_extraction(&self, parse_failed: bool) {
        self.documents_extracted_total
            .fetch_add(1, Ordering::Relaxed);
        if parse_failed {
            self.parse_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_skip(&self) {
        self.documents_skipped_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_indexed(&self, count: usize) {
        self.documents_indexed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms();
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a snapshot of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            documents_extracted_total: self.documents_extracted_total.load(Ordering::Relaxed),
            documents_skipped_total: self.documents_skipped_total.load(Ordering::Relaxed),
            parse_failures_total: self.parse_failures_total.load(Ordering::Relaxed),
            documents_indexed_total: self.documents_indexed_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub documents_extracted_total: u64,
    pub documents_skipped_total: u64,
    pub parse_failures_total: u64,
    pub documents_indexed_total: u64,
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "http_requests={} http_errors={} http_avg_ms={:.1} extracted={} skipped={} parse_failures={} indexed={}",
            self.http_requests_total,
            self.http_errors_total,
            self.http_duration_avg_ms,
            self.documents_extracted_total,
            self.documents_skipped_total,
            self.parse_failures_total,
            self.documents_indexed_total,
        )
    }
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Record the request, counting it as an error when `failed` is set.
    pub fn finish(self, failed: bool) {
        self.metrics.record_http_request(self.start.elapsed());
        if failed {
            self.metrics.record_http_error();
        }
    }
}
