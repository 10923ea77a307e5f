//! `/metrics` scrape endpoint and request instrumentation

pub mod handlers;
pub mod middleware;

pub use handlers::{describe_portal_metrics, prometheus_metrics, MetricsState};
pub use middleware::http_metrics_middleware;
