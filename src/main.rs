//! Users Service
//!
//! A user-management HTTP service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  USERS SERVICE                   │
//!                      │                                                  │
//!   Client Request     │  ┌──────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ───────────────────┼─▶│  http    │──▶│ handlers │──▶│ order       │  │
//!                      │  │  server  │   │          │   │ attachment  │──┼──▶ Orders
//!                      │  └──────────┘   └────┬─────┘   └──────┬──────┘  │    Service
//!                      │                      │                │         │
//!                      │                      ▼                ▼         │
//!                      │                 ┌──────────────────────────┐    │
//!                      │                 │      document store      │    │
//!                      │                 └──────────────────────────┘    │
//!                      │                                                  │
//!                      │  ┌────────────────────────────────────────────┐ │
//!                      │  │           Cross-Cutting Concerns           │ │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌───────────┐  │ │
//!                      │  │  │ config │ │observability│ │resilience │  │ │
//!                      │  │  └────────┘ └─────────────┘ └───────────┘  │ │
//!                      │  └────────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod orders;
pub mod store;

// Cross-cutting concerns
pub mod observability;
pub mod resilience;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::loader::load_config;
use crate::config::ServiceConfig;
use crate::http::server::shutdown_signal;
use crate::http::HttpServer;
use crate::orders::client::{HttpOrdersClient, OrdersApi};
use crate::store::{MemoryStore, UserStore};

#[derive(Debug, Parser)]
#[command(name = "users-service", about = "User management service")]
struct Args {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("users-service v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        orders_base_url = %config.orders.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            crate::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Build the document store; the handle is injected into the router, so
    // no request can run before the store exists.
    let store: Arc<dyn UserStore> = Arc::new(match &config.store.persistence_path {
        Some(path) => MemoryStore::load_from_file(path)?,
        None => MemoryStore::new(None),
    });

    let orders: Arc<dyn OrdersApi> =
        Arc::new(HttpOrdersClient::new(&config.orders, config.retries.clone())?);

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Create and run HTTP server
    let server = HttpServer::new(&config, store, orders);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
