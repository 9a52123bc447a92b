//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the nearby server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Durable artifact presence (collected dynamically)
//! - Core fetch job and watcher metrics (registered from `nearby_core`)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

use nearby_core::{ArtifactName, ArtifactStore};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nearby_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nearby_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "nearby_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Artifact Metrics
// =============================================================================

/// Whether a durable artifact exists per category (collected dynamically).
pub static DURABLE_ARTIFACTS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new(
            "nearby_durable_artifacts",
            "Whether each category currently has published results (0/1)",
        ),
        &["category"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Artifacts
    registry
        .register(Box::new(DURABLE_ARTIFACTS.clone()))
        .unwrap();

    // Core metrics (fetch jobs, watcher)
    for metric in nearby_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the artifact gauges reflect the directory.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let orchestrator = state.orchestrator();
    let store = orchestrator.store();

    for category in orchestrator.categories() {
        let Ok(name) = ArtifactName::durable(&category) else {
            continue;
        };
        match store.exists(&name).await {
            Ok(present) => DURABLE_ARTIFACTS
                .with_label_values(&[category.as_str()])
                .set(i64::from(present)),
            Err(e) => tracing::warn!("Skipping artifact gauge for {}: {}", category, e),
        }
    }
}

/// Metric label for a request path.
///
/// Routed requests use their route template; anything that fell through
/// to the static directory shares one label.
pub fn path_label(matched: Option<&str>) -> String {
    matched.unwrap_or("static").to_string()
}
