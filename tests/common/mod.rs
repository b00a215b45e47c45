//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use users_service::config::ServiceConfig;
use users_service::orders::client::{HttpOrdersClient, OrdersApi};
use users_service::store::{MemoryStore, NewUser, UserStore};
use users_service::HttpServer;

/// Start a programmable mock Orders service on an ephemeral port.
///
/// The callback receives the request line (e.g. `POST /order HTTP/1.1`) and
/// returns the status and JSON body to answer with.
pub async fn start_mock_orders<F>(f: F) -> SocketAddr
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request_line = match read_request(&mut socket).await {
                            Some(line) => line,
                            None => return,
                        };
                        let (status, body) = f(&request_line);
                        let status_text = match status {
                            200 => "200 OK",
                            201 => "201 Created",
                            202 => "202 Accepted",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read the request head plus the declared body, returning the request line.
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    // Drain the body so the client finishes writing before we respond.
    let mut remaining = content_length.saturating_sub(buf.len() - (header_end + 4));
    while remaining > 0 {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        remaining = remaining.saturating_sub(n);
    }

    Some(head.lines().next().unwrap_or("").to_string())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Spawn the users service on an ephemeral port, pointed at the given Orders
/// service base URL. Returns the service base URL, a handle to its store for
/// seeding and inspection, and a shutdown trigger.
#[allow(dead_code)]
pub async fn spawn_service(
    orders_base_url: String,
) -> (String, MemoryStore, oneshot::Sender<()>) {
    let mut config = ServiceConfig::default();
    config.orders.base_url = orders_base_url;
    config.orders.timeout_secs = 2;
    config.retries.enabled = false;

    let store = MemoryStore::new(None);
    let orders: Arc<dyn OrdersApi> = Arc::new(
        HttpOrdersClient::new(&config.orders, config.retries.clone()).unwrap(),
    );

    let server = HttpServer::new(&config, Arc::new(store.clone()), orders);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    (format!("http://{}", addr), store, shutdown_tx)
}

/// Insert a known user and return its id.
#[allow(dead_code)]
pub async fn seed_user(store: &MemoryStore) -> String {
    let user = store
        .insert(NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            orders: Vec::new(),
        })
        .await
        .unwrap();
    user.id
}
