//! Order attachment orchestration.
//!
//! # Responsibilities
//! - Create the order on the remote Orders service
//! - Append the new order's id to the owning user document
//! - Report every partial outcome distinctly
//!
//! # Design Decisions
//! - The two steps are not transactional: no distributed lock, no rollback.
//!   A remote create followed by a failed local attach leaves an orphaned
//!   remote order; that outcome is logged, counted, and returned as an error
//!   the caller can tell apart from a remote-create failure, so drift between
//!   the services can be repaired out of band
//! - The remote create is single-attempt: it is not idempotent and a blind
//!   retry could duplicate orders

use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::orders::client::{OrdersApi, OrdersError};
use crate::orders::types::{CreateOrderRequest, OrderFields};
use crate::store::{StoreError, UserStore};

/// Error type for the order-attachment saga.
///
/// `UserNotFound` and `AttachPersistFailed` mean the remote create already
/// succeeded: the named order exists on the Orders service with no local
/// reference.
#[derive(Debug, Error)]
pub enum AttachError {
    /// The create call to the Orders service failed outright. No local or
    /// remote state changed.
    #[error("error while creating the order: {0}")]
    RemoteCall(#[source] OrdersError),

    /// The Orders service answered with a non-created status. No local state
    /// changed.
    #[error("order not created: orders service answered status {status}")]
    RemoteCreateFailed { status: u16 },

    /// The user vanished between request start and attach. The order is
    /// orphaned on the Orders service.
    #[error("user {user_id} not found; order {order_id} is orphaned on the orders service")]
    UserNotFound { user_id: String, order_id: String },

    /// The order reference could not be persisted on the user document. The
    /// order is orphaned on the Orders service.
    #[error("failed to add order {order_id} to user {user_id}'s document")]
    AttachPersistFailed {
        user_id: String,
        order_id: String,
        #[source]
        source: StoreError,
    },
}

/// Successful attachment outcome.
#[derive(Debug, Clone)]
pub struct OrderAttached {
    /// Id assigned by the Orders service.
    pub order_id: String,
    /// Human-readable confirmation referencing the user's email.
    pub message: String,
}

/// Coordinates the "create order remotely, reference it locally" saga.
pub struct OrderAttachment {
    store: Arc<dyn UserStore>,
    orders: Arc<dyn OrdersApi>,
}

impl OrderAttachment {
    /// Create an orchestrator over the injected collaborators.
    pub fn new(store: Arc<dyn UserStore>, orders: Arc<dyn OrdersApi>) -> Self {
        Self { store, orders }
    }

    /// Attach a new order to the user with the given id.
    pub async fn attach_order(
        &self,
        user_id: &str,
        fields: OrderFields,
    ) -> Result<OrderAttached, AttachError> {
        let request = CreateOrderRequest::for_user(user_id, fields);

        let created = match self.orders.create_order(request).await {
            Ok(created) => created,
            Err(OrdersError::UnexpectedStatus(status)) => {
                return Err(AttachError::RemoteCreateFailed { status });
            }
            Err(e) => return Err(AttachError::RemoteCall(e)),
        };

        // The remote order exists from here on; every failure below leaves it
        // orphaned and must say so.
        let user = match self.store.find(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.report_orphan(user_id, &created.id, "user_missing");
                return Err(AttachError::UserNotFound {
                    user_id: user_id.to_string(),
                    order_id: created.id,
                });
            }
            Err(source) => {
                self.report_orphan(user_id, &created.id, "persist_failed");
                return Err(AttachError::AttachPersistFailed {
                    user_id: user_id.to_string(),
                    order_id: created.id,
                    source,
                });
            }
        };

        match self.store.append_order(user_id, &created.id).await {
            Ok(Some(())) => {}
            Ok(None) => {
                self.report_orphan(user_id, &created.id, "user_missing");
                return Err(AttachError::UserNotFound {
                    user_id: user_id.to_string(),
                    order_id: created.id,
                });
            }
            Err(source) => {
                self.report_orphan(user_id, &created.id, "persist_failed");
                return Err(AttachError::AttachPersistFailed {
                    user_id: user_id.to_string(),
                    order_id: created.id,
                    source,
                });
            }
        }

        tracing::info!(user_id = %user_id, order_id = %created.id, "Order attached");

        Ok(OrderAttached {
            message: format!(
                "Order created for user:{} with orderId:{}",
                user.email, created.id
            ),
            order_id: created.id,
        })
    }

    fn report_orphan(&self, user_id: &str, order_id: &str, reason: &'static str) {
        tracing::error!(
            user_id = %user_id,
            order_id = %order_id,
            reason = reason,
            "Remote order created but not referenced locally; needs reconciliation"
        );
        metrics::record_orphaned_order(reason);
    }
}
