//! Per-request telemetry wrapper.
//!
//! # Responsibilities
//! - Start the timer before the handler runs
//! - Invoke the handler with inputs and outputs unchanged
//! - Emit the latency and payload-size measurements exactly once per
//!   completed request, tagged with the route label and the status actually
//!   written
//!
//! # Design Decisions
//! - The wrapper only observes: it never rewrites status, body, or headers,
//!   and handler error responses pass through untouched

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use hyper::body::Body as _;

use crate::observability::metrics;

/// Middleware measuring every request.
///
/// The route label is the matched path template (e.g. `/users/{uid}/order`)
/// so measurements aggregate per route, not per concrete id; unmatched
/// requests fall back to the raw path.
pub async fn request_telemetry(request: Request, next: Next) -> Response {
    let started = Instant::now();

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    // Exact size is only known for fixed bodies; streaming bodies report 0
    // and the noise term stands in for the unmeasured part.
    let known_length = response.body().size_hint().exact().unwrap_or(0) as f64;

    metrics::record_payload_size(&route, status, known_length + metrics::estimation_noise());
    metrics::record_latency(&route, status, started.elapsed());

    response
}
