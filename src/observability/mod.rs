//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! every request
//!     → trace.rs (per-request trace context, correlation id header)
//!     → middleware.rs (timer around the handler)
//!     → metrics.rs (latency + payload-size measurements, Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Measurement emission is fire-and-forget: it can never change a
//!   response's status, body, or headers
//! - The trace context is an explicit per-request value in extensions, not an
//!   ambient process-wide lookup
//! - Metrics are cheap (atomic recorder operations)

pub mod metrics;
pub mod middleware;
pub mod trace;
