//! Metrics collection and exposition.
//!
//! # Metrics
//! - `users_request_duration_ms` (histogram): wall-clock latency by route, status
//! - `users_response_payload_bytes` (histogram): approximate response size by
//!   route, status
//! - `users_orphaned_orders_total` (counter): remote orders left without a
//!   local reference, by reason
//!
//! # Design Decisions
//! - The payload measurement is an estimate: known content length plus a
//!   jitter term standing in for unmeasured overhead, not an exact byte count
//! - Recording is infallible from the caller's view; exporter problems are
//!   logged and never reach a request path

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and describe the measurement families.
///
/// Failure to install is logged and otherwise ignored: telemetry must never
/// keep the service from starting.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %e, "Failed to install Prometheus exporter");
        return;
    }

    describe_histogram!(
        "users_request_duration_ms",
        Unit::Milliseconds,
        "Wall-clock time from request start to telemetry emission"
    );
    describe_histogram!(
        "users_response_payload_bytes",
        Unit::Bytes,
        "Approximate response size: known content length plus estimation noise"
    );
    describe_counter!(
        "users_orphaned_orders_total",
        "Orders created remotely that could not be referenced locally"
    );

    tracing::info!(address = %addr, "Prometheus exporter listening");
}

/// Record the approximate payload size of a completed response.
pub fn record_payload_size(route: &str, status: u16, bytes: f64) {
    histogram!(
        "users_response_payload_bytes",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(bytes);
}

/// Record the latency of a completed request in milliseconds.
pub fn record_latency(route: &str, status: u16, elapsed: Duration) {
    histogram!(
        "users_request_duration_ms",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed.as_secs_f64() * 1000.0);
}

/// Count a remote order left without a local reference.
pub fn record_orphaned_order(reason: &'static str) {
    counter!("users_orphaned_orders_total", "reason" => reason).increment(1);
}

/// Jitter standing in for response overhead the content length misses
/// (headers, framing, streaming bodies reported as zero).
pub fn estimation_noise() -> f64 {
    fastrand::f64() * 1000.0
}
