//! Prometheus scrape endpoint and metric catalogue

use axum::{extract::State, http::header, response::IntoResponse};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusHandle;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for every series the portal emits.
pub fn describe_portal_metrics() {
    describe_counter!(
        "gate_decisions_total",
        "Authorization gate decisions by policy and outcome"
    );
    describe_counter!("guide_approvals_total", "Guide CVs approved by an administrator");
    describe_counter!(
        "approval_notifications_failed_total",
        "CV approvals whose notification could not be recorded"
    );
    describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by method and route"
    );
}

/// `GET /metrics`, no session required
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], state.handle.render())
}
