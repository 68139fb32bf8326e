//! Request metrics for the connector API.
//!
//! Search calls spend most of their time waiting on the site, so the
//! duration histogram is what shows a slow or blocked IsoHunt mirror.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Count and time every request, labelled by method, status and path.
/// Numeric path segments are folded to `{id}` so that stray lookups by
/// torrent id cannot grow the label set.
///
/// The in-flight gauge covers the whole handler, including the sequential
/// site queries a season search issues.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let status = response.status().as_u16().to_string();
    let labels = [method.as_str(), path.as_str(), status.as_str()];
    HTTP_REQUEST_DURATION
        .with_label_values(&labels)
        .observe(elapsed.as_secs_f64());
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();

    response
}
