//! Basic metrics instrumentation for tracking endpoint traffic.
//!
//! Provides counters and duration tracking for HTTP requests made by the
//! service client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by clones of a client.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of invocation batches posted
    invocations_sent_total: Arc<AtomicU64>,

    /// Bytes of encoded invocations posted
    bytes_sent_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            invocations_sent_total: Arc::new(AtomicU64::new(0)),
            bytes_sent_total: Arc::new(AtomicU64::new(0)),
        }
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

    /// Record an invocation batch of `bytes` encoded bytes.
    pub fn record_invocation_sent(&self, bytes: usize) {
        self.invocations_sent_total.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent_total
            .fetch_add(bytes as u64, Ordering::Relaxed);
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

    pub fn invocations_sent_total(&self) -> u64 {
        self.invocations_sent_total.load(Ordering::Relaxed)
    }

    pub fn bytes_sent_total(&self) -> u64 {
        self.bytes_sent_total.load(Ordering::Relaxed)
    }

    /// Snapshot of every counter, with the mean request duration.
    pub fn summary(&self) -> MetricsSummary {
        let requests = self.http_requests_total();
        let duration_ms = self.http_duration_total_ms();
        let avg_ms = if requests == 0 {
            0.0
        } else {
            duration_ms as f64 / requests as f64
        };

        MetricsSummary {
            http_requests_total: requests,
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: duration_ms,
            http_duration_avg_ms: avg_ms,
            invocations_sent_total: self.invocations_sent_total(),
            bytes_sent_total: self.bytes_sent_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub invocations_sent_total: u64,
    pub bytes_sent_total: u64,
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

    /// Complete the timing and record the duration.
    pub fn complete(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        duration
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
        duration
    }
}
