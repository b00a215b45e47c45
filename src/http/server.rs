//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, trace context, telemetry)
//! - Inject the store and Orders client into handler state
//! - Serve with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::observability::middleware::request_telemetry;
use crate::observability::trace::trace_context;
use crate::orders::attach::OrderAttachment;
use crate::orders::client::OrdersApi;
use crate::store::UserStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub orders: Arc<dyn OrdersApi>,
    pub attachment: Arc<OrderAttachment>,
}

/// HTTP server for the users service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the injected collaborators.
    pub fn new(
        config: &ServiceConfig,
        store: Arc<dyn UserStore>,
        orders: Arc<dyn OrdersApi>,
    ) -> Self {
        let attachment = Arc::new(OrderAttachment::new(store.clone(), orders.clone()));

        let state = AppState {
            store,
            orders,
            attachment,
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/users", get(handlers::list_users))
            .route(
                "/users/{uid}",
                get(handlers::get_user).delete(handlers::delete_user),
            )
            .route(
                "/users/{uid}/orders",
                get(handlers::list_user_orders).delete(handlers::delete_user_orders),
            )
            .route("/user", post(handlers::create_user))
            .route("/users/{uid}/order", post(handlers::create_order))
            .with_state(state)
            .layer(
                // Outermost first: request tracing, then the trace context,
                // then the telemetry timer, then the inbound timeout. The
                // timer sits outside the timeout so 408s are measured too.
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(trace_context))
                    .layer(middleware::from_fn(request_telemetry))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown future resolves.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
