//! Orders service integration.
//!
//! # Data Flow
//! ```text
//! POST /users/{uid}/order
//!     → attach.rs (two-step saga: remote create → local attach)
//!     → client.rs (HTTP client for the remote Orders service)
//!     → store (append order reference to the user document)
//! ```
//!
//! The two steps span independently-failing services with no shared
//! transaction; attach.rs reports every partial outcome distinctly so drift
//! between the services stays visible.

pub mod attach;
pub mod client;
pub mod types;

pub use attach::{AttachError, OrderAttached, OrderAttachment};
pub use client::{HttpOrdersClient, OrdersApi, OrdersError};
