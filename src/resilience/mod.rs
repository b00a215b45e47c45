//! Resilience primitives for remote calls.
//!
//! # Design Decisions
//! - Only idempotent Orders service calls are retried; the order create is
//!   non-idempotent and always single-attempt
//! - Jittered backoff prevents thundering herd against a recovering upstream

pub mod backoff;

pub use backoff::backoff_delay;
