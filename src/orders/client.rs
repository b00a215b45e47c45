//! HTTP client for the remote Orders service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{OrdersConfig, RetryConfig};
use crate::orders::types::{CreateOrderRequest, CreatedOrder};
use crate::resilience::backoff_delay;

/// Error type for Orders service calls.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The call never produced a response (connect failure, timeout, ...).
    #[error("orders service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status outside the operation's contract.
    #[error("orders service returned status {0}")]
    UnexpectedStatus(u16),

    /// The service answered successfully but the body was unreadable.
    #[error("orders service returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client operations against the Orders service.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Create an order. Succeeds only when the service reports `201 Created`
    /// and returns the new order's id.
    async fn create_order(&self, order: CreateOrderRequest) -> Result<CreatedOrder, OrdersError>;

    /// List the orders belonging to a user, passed through verbatim.
    async fn list_orders(&self, user_id: &str) -> Result<serde_json::Value, OrdersError>;

    /// Delete every order belonging to a user.
    async fn delete_orders(&self, user_id: &str) -> Result<(), OrdersError>;
}

/// `reqwest`-backed Orders service client.
///
/// Every call carries the configured timeout. Only `delete_orders` is
/// retried: deleting by user id is idempotent, while `create_order` is not
/// and a blind retry could duplicate orders.
pub struct HttpOrdersClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpOrdersClient {
    /// Build a client from config.
    pub fn new(config: &OrdersConfig, retry: RetryConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn max_attempts(&self) -> u32 {
        if self.retry.enabled {
            self.retry.max_attempts.max(1)
        } else {
            1
        }
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersClient {
    async fn create_order(&self, order: CreateOrderRequest) -> Result<CreatedOrder, OrdersError> {
        let response = self
            .client
            .post(format!("{}/order", self.base_url))
            .json(&order)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(OrdersError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<CreatedOrder>()
            .await
            .map_err(OrdersError::Decode)
    }

    async fn list_orders(&self, user_id: &str) -> Result<serde_json::Value, OrdersError> {
        let response = self
            .client
            .get(format!("{}/orders", self.base_url))
            .query(&[("uid", user_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrdersError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(OrdersError::Decode)
    }

    async fn delete_orders(&self, user_id: &str) -> Result<(), OrdersError> {
        let max_attempts = self.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = self
                .client
                .delete(format!("{}/orders", self.base_url))
                .query(&[("uid", user_id)])
                .send()
                .await;

            let retryable = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(_) => true,
            };

            if retryable && attempt < max_attempts {
                let delay = backoff_delay(attempt, self.retry.base_delay_ms, self.retry.max_delay_ms);
                tracing::info!(
                    user_id = %user_id,
                    attempt = attempt,
                    delay = ?delay,
                    "Retrying orders bulk delete"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let response = result?;
            let status = response.status();
            if !status.is_success() {
                return Err(OrdersError::UnexpectedStatus(status.as_u16()));
            }
            return Ok(());
        }
    }
}
