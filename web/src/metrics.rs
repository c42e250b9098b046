//! # Prometheus Metrics
//!
//! Operational counters for the explorer front end, scraped from
//! `/metrics` on the dedicated metrics port. All metrics live in their own
//! registry under the `pgexplorer` namespace so nothing collides with a
//! default global registry.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// All metric handles for the front end. Handles are cheap to clone; the
/// struct is shared behind an [`Arc`].
pub struct ExplorerMetrics {
    registry: Registry,
    /// Block pages rendered successfully.
    pub pages_rendered_total: IntCounter,
    /// Lookups that resolved to a non-block record and were redirected.
    pub lookup_redirects_total: IntCounter,
    /// Lookups the daemon did not recognize.
    pub unknown_identifier_total: IntCounter,
    /// Page views aborted by daemon transport or envelope failures.
    pub daemon_failures_total: IntCounter,
    /// Wall time to resolve and render one block page, daemon queries
    /// included.
    pub page_resolve_duration_seconds: Histogram,
}

impl ExplorerMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("pgexplorer".into()), None)
            .expect("failed to create prometheus registry");

        let pages_rendered_total = IntCounter::new(
            "pages_rendered_total",
            "Number of block pages rendered successfully",
        )
        .expect("metric creation");
        registry
            .register(Box::new(pages_rendered_total.clone()))
            .expect("metric registration");

        let lookup_redirects_total = IntCounter::new(
            "lookup_redirects_total",
            "Number of lookups redirected to the generic record view",
        )
        .expect("metric creation");
        registry
            .register(Box::new(lookup_redirects_total.clone()))
            .expect("metric registration");

        let unknown_identifier_total = IntCounter::new(
            "unknown_identifier_total",
            "Number of lookups the daemon did not recognize",
        )
        .expect("metric creation");
        registry
            .register(Box::new(unknown_identifier_total.clone()))
            .expect("metric registration");

        let daemon_failures_total = IntCounter::new(
            "daemon_failures_total",
            "Number of page views aborted by daemon failures",
        )
        .expect("metric creation");
        registry
            .register(Box::new(daemon_failures_total.clone()))
            .expect("metric registration");

        let page_resolve_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "page_resolve_duration_seconds",
                "Time to resolve and render one block page",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(page_resolve_duration_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            pages_rendered_total,
            lookup_redirects_total,
            unknown_identifier_total,
            daemon_failures_total,
            page_resolve_duration_seconds,
        }
    }

    /// Encodes the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        encoder.encode_to_string(&self.registry.gather())
    }
}

impl Default for ExplorerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics handle passed to axum handlers.
pub type SharedMetrics = Arc<ExplorerMetrics>;

/// Axum handler for `/metrics`.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
