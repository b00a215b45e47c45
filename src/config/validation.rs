//! Semantic configuration validation.
//!
//! Serde handles syntactic validity; this module checks the constraints a
//! parsed config must still satisfy before the service may start.

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    MetricsAddress(String),

    #[error("orders.base_url {url:?} is invalid: {reason}")]
    OrdersUrl { url: String, reason: String },

    #[error("orders.timeout_secs must be greater than zero")]
    OrdersTimeout,

    #[error("retries.max_attempts must be at least 1 when retries are enabled")]
    RetryAttempts,
}

/// Validate a parsed configuration, collecting every failure.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    match Url::parse(&config.orders.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::OrdersUrl {
            url: config.orders.base_url.clone(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::OrdersUrl {
            url: config.orders.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.orders.timeout_secs == 0 {
        errors.push(ValidationError::OrdersTimeout);
    }

    if config.retries.enabled && config.retries.max_attempts == 0 {
        errors.push(ValidationError::RetryAttempts);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_bad_addresses_rejected() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.observability.metrics_address = "also wrong".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_bad_orders_url_rejected() {
        let mut config = ServiceConfig::default();
        config.orders.base_url = "ftp://orders.internal".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::OrdersUrl { .. }));
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = ServiceConfig::default();
        config.retries.max_attempts = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::RetryAttempts));

        // Fine when retries are off entirely.
        config.retries.enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
