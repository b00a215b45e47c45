//! Users Service Library
//!
//! A user-management HTTP service that attaches orders created on a remote
//! Orders service to local user documents, instrumenting every request with
//! latency and payload-size measurements plus a correlation id header.

pub mod config;
pub mod http;
pub mod observability;
pub mod orders;
pub mod resilience;
pub mod store;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
