//! User document store.
//!
//! # Data Flow
//! ```text
//! handlers / orchestrator
//!     → dyn UserStore (injected at router construction)
//!     → memory.rs (DashMap-backed documents, optional JSON snapshot)
//! ```
//!
//! # Design Decisions
//! - The store handle is passed into server construction explicitly; there is
//!   no deferred global assignment, so requests can never observe a
//!   half-initialized store
//! - Store calls return structured results; the HTTP layer translates them
//!   into status codes

pub mod memory;
pub mod user;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use user::{NewUser, User};

/// Error type for document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store persistence failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Document-store operations on user documents, keyed by opaque id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List every user document.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// Look up a single user by id.
    async fn find(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user document, assigning it an id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Append an order reference to a user's order sequence and persist.
    ///
    /// Returns `Ok(None)` when no user with that id exists.
    async fn append_order(&self, id: &str, order_id: &str) -> Result<Option<()>, StoreError>;

    /// Delete a user document, returning it if it existed.
    async fn delete(&self, id: &str) -> Result<Option<User>, StoreError>;
}
