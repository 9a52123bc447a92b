//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Fetch jobs (count and duration by outcome)
//! - Completion watcher polling

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Fetch Job Metrics
// =============================================================================

/// `category` label for jobs whose search term came from the client.
pub const QUERY_CATEGORY: &str = "query";

/// Fetch jobs total by category and result.
///
/// `category` is a configured category or [`QUERY_CATEGORY`].
pub static FETCH_JOBS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nearby_fetch_jobs_total", "Total fetch jobs run"),
        &["category", "result"], // "succeeded", "timed_out", "worker_failed", ...
    )
    .unwrap()
});

/// Fetch job duration in seconds, from invocation to parsed result.
pub static FETCH_JOB_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nearby_fetch_job_duration_seconds",
            "Duration of a single fetch job",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Watcher Metrics
// =============================================================================

/// Existence checks made while waiting for artifacts.
pub static WATCHER_POLLS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "nearby_watcher_polls_total",
        "Artifact existence checks made by the completion watcher",
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FETCH_JOBS.clone()),
        Box::new(FETCH_JOB_DURATION.clone()),
        Box::new(WATCHER_POLLS.clone()),
    ]
}

/// Record a finished fetch job.
pub fn record_fetch_job(category: &str, result: &str, duration_secs: f64) {
    FETCH_JOBS.with_label_values(&[category, result]).inc();
    FETCH_JOB_DURATION
        .with_label_values(&[result])
        .observe(duration_secs);
}
