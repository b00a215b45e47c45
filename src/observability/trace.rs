//! Per-request trace context and correlation id formatting.
//!
//! # Responsibilities
//! - Carry a 32-hex trace id through each request as an explicit extension
//! - Format the trace id into the downstream correlation id shape
//! - Attach the correlation id header to every instrumented response
//!
//! # Design Decisions
//! - The formatter is a pure function over the trace id; a missing or
//!   malformed id is non-fatal and only drops the header

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;
use uuid::Uuid;

/// Header carrying the formatted correlation id on responses.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Header a caller may use to hand us an existing 32-hex trace id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// The active trace identifier for one request: 32 lowercase hex characters.
#[derive(Debug, Clone)]
pub struct RequestTrace {
    trace_id: String,
}

impl RequestTrace {
    /// Start a fresh trace.
    pub fn generate() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Adopt a caller-supplied trace id if it has the expected shape.
    pub fn from_header(value: &str) -> Option<Self> {
        if is_hex32(value) {
            Some(Self {
                trace_id: value.to_ascii_lowercase(),
            })
        } else {
            None
        }
    }

    /// The raw 32-hex trace id.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }
}

/// Error type for correlation id formatting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceContextError {
    #[error("no active trace context")]
    Missing,

    #[error("trace id {0:?} is not a 32-character hex value")]
    Malformed(String),
}

/// Format a trace id as a downstream correlation id.
///
/// Splits the 32-hex id into an 8-character timestamp prefix and a
/// 24-character random suffix, reassembled as `1-<prefix>-<suffix>`.
pub fn format_correlation_id(trace_id: &str) -> Result<String, TraceContextError> {
    if !is_hex32(trace_id) {
        return Err(TraceContextError::Malformed(trace_id.to_string()));
    }
    let (timestamp, random) = trace_id.split_at(8);
    Ok(format!("1-{}-{}", timestamp, random))
}

fn is_hex32(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Middleware establishing the per-request trace context.
///
/// Reuses a well-formed caller-provided trace id, otherwise starts a fresh
/// one, stores it in request extensions, and attaches the formatted
/// correlation id to the response. Formatting failures drop the header and
/// nothing else.
pub async fn trace_context(mut request: Request, next: Next) -> Response {
    let trace = request
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(RequestTrace::from_header)
        .unwrap_or_else(RequestTrace::generate);

    request.extensions_mut().insert(trace.clone());

    let mut response = next.run(request).await;

    match format_correlation_id(trace.trace_id()) {
        Ok(correlation_id) => {
            if let Ok(value) = HeaderValue::from_str(&correlation_id) {
                response.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "No correlation id attached");
        }
    }

    response
}
