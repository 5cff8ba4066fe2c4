//! Prometheus Metrics Definitions
//!
//! Request, search and intent metrics, exposed at `/metrics` for scraping.

use axum::{http::StatusCode, response::IntoResponse};
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_histogram_vec, CounterVec, Encoder,
    Histogram, HistogramVec, TextEncoder,
};

use crate::error::{ApiError, ApiResult};

/// HTTP request latency buckets (seconds)
/// Covers: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const HTTP_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.0, 2.5, 5.0, 10.0,
];

/// Result-set size buckets for catalog searches
const SEARCH_RESULT_BUCKETS: &[f64] = &[0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0];

/// Global metrics instance - initialized once on first use
pub static METRICS: Lazy<ApiResult<ProtoaiMetrics>> = Lazy::new(ProtoaiMetrics::new);

/// Container for all ProtoAi metrics.
#[derive(Clone)]
pub struct ProtoaiMetrics {
    /// HTTP request counter - labels: method, path, status
    pub http_requests_total: CounterVec,

    /// HTTP request duration histogram - labels: method, path
    pub http_request_duration_seconds: HistogramVec,

    /// Catalog search counter - labels: status (success/error)
    pub catalog_searches_total: CounterVec,

    /// Number of results per successful search
    pub catalog_search_results: Histogram,

    /// Intent dispatch counter - labels: kind, outcome
    pub intents_total: CounterVec,
}

impl ProtoaiMetrics {
    /// Create and register all metrics with Prometheus.
    pub fn new() -> ApiResult<Self> {
        Ok(Self {
            http_requests_total: register_counter_vec!(
                "protoai_http_requests_total",
                "Total number of HTTP requests",
                &["method", "path", "status"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register http_requests_total: {}", e)))?,

            http_request_duration_seconds: register_histogram_vec!(
                "protoai_http_request_duration_seconds",
                "HTTP request duration in seconds",
                &["method", "path"],
                HTTP_LATENCY_BUCKETS.to_vec()
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register http_request_duration_seconds: {}", e)))?,

            catalog_searches_total: register_counter_vec!(
                "protoai_catalog_searches_total",
                "Total catalog searches",
                &["status"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register catalog_searches_total: {}", e)))?,

            catalog_search_results: register_histogram!(
                "protoai_catalog_search_results",
                "Number of records returned per catalog search",
                SEARCH_RESULT_BUCKETS.to_vec()
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register catalog_search_results: {}", e)))?,

            intents_total: register_counter_vec!(
                "protoai_intents_total",
                "Total dispatched intents",
                &["kind", "outcome"]
            )
            .map_err(|e| ApiError::internal_error(format!("Failed to register intents_total: {}", e)))?,
        })
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// Record a catalog search; `results` is `None` when the search failed.
    pub fn record_catalog_search(&self, results: Option<usize>) {
        match results {
            Some(count) => {
                self.catalog_searches_total
                    .with_label_values(&["success"])
                    .inc();
                self.catalog_search_results.observe(count as f64);
            }
            None => {
                self.catalog_searches_total
                    .with_label_values(&["error"])
                    .inc();
            }
        }
    }

    /// Record a dispatched intent.
    pub fn record_intent(&self, kind: &str, outcome: &str) {
        self.intents_total.with_label_values(&[kind, outcome]).inc();
    }
}

/// Handler for GET /metrics endpoint.
///
/// Returns Prometheus text format metrics.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Observability",
    responses(
        (status = 200, description = "Prometheus metrics in text format", content_type = "text/plain"),
        (status = 500, description = "Failed to encode metrics"),
    ),
)]
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                format!("Failed to encode metrics: {}", e).into_bytes(),
            )
        }
    }
}
