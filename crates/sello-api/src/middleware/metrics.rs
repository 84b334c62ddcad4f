//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) recorded in
//! middleware and exported from a per-process Prometheus registry via
//! the `/metrics` handler.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{Encoder, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

use crate::state::AppState;

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics").finish_non_exhaustive()
    }
}

impl ApiMetrics {
    /// Create a metrics instance with a fresh registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("sello_http_requests_total", "HTTP requests received"),
            &["method", "path", "status"],
        )
        .expect("valid metric opts");
        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "sello_http_request_duration_seconds",
                "HTTP request latency",
            ),
            &["method", "path"],
        )
        .expect("valid metric opts");
        let http_errors_total = IntCounterVec::new(
            Opts::new("sello_http_errors_total", "HTTP 5xx responses"),
            &["method", "path"],
        )
        .expect("valid metric opts");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("fresh registry");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("fresh registry");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
            }),
        }
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder
            .encode(&self.inner.registry.gather(), &mut buffer)
            .is_err()
        {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum middleware recording per-request counters and latency.
pub async fn track(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let metrics = &state.metrics.inner;
    let status = response.status().as_u16().to_string();
    metrics
        .http_requests_total
        .with_label_values(&[&method, &path, &status])
        .inc();
    metrics
        .http_request_duration_seconds
        .with_label_values(&[&method, &path])
        .observe(started.elapsed().as_secs_f64());
    if response.status().is_server_error() {
        metrics
            .http_errors_total
            .with_label_values(&[&method, &path])
            .inc();
    }

    response
}

/// GET /metrics — Prometheus scrape endpoint.
pub async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}
