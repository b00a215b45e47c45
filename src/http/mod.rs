//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! listener → server.rs (router + middleware stack)
//!          → handlers.rs (status translation at the boundary)
//!          → store / orders collaborators from AppState
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
