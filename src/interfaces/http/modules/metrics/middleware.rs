//! Per-request HTTP metrics

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Label used when no route matched, so probing scanners share one series
const UNMATCHED: &str = "unmatched";

/// Scrapes are not counted
const SCRAPE_PATH: &str = "/metrics";

/// Records `http_requests_total{method,path,status}` and
/// `http_request_duration_seconds{method,path}`.
///
/// `path` is the route template, e.g. `/api/v1/admin/guides/{id}/approve`,
/// never the concrete guide id.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let path = match request.extensions().get::<MatchedPath>() {
        Some(matched) if matched.as_str() == SCRAPE_PATH => return next.run(request).await,
        Some(matched) => matched.as_str().to_owned(),
        None => UNMATCHED.to_owned(),
    };
    let method = request.method().as_str().to_owned();

    let started = Instant::now();
    let response = next.run(request).await;

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(started.elapsed().as_secs_f64());
    metrics::counter!(
        "http_requests_total",
        "method" => method,
        "path" => path,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{middleware, Router};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    // The local recorder is thread-bound; `#[tokio::test]` keeps the whole
    // request on the test thread.
    #[tokio::test]
    async fn series_use_route_templates_not_ids() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let app = Router::new()
            .route("/api/v1/admin/guides/{id}/approve", post(|| async { StatusCode::OK }))
            .route(SCRAPE_PATH, get(|| async { "" }))
            .layer(middleware::from_fn(http_metrics_middleware));

        for uri in [
            "/api/v1/admin/guides/0b6c1f/approve",
            "/api/v1/admin/guides/9e42aa/approve",
        ] {
            let req = Request::post(uri).body(Body::empty()).unwrap();
            app.clone().oneshot(req).await.unwrap();
        }
        let req = Request::get("/wp-login.php").body(Body::empty()).unwrap();
        app.clone().oneshot(req).await.unwrap();
        let req = Request::get(SCRAPE_PATH).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap();

        let text = handle.render();
        assert!(text.contains(r#"path="/api/v1/admin/guides/{id}/approve""#));
        assert!(!text.contains("0b6c1f"));
        assert!(text.contains(r#"path="unmatched""#));
        assert!(!text.contains(r#"path="/metrics""#));
    }
}
