//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use object_gateway::{GatewayConfig, HttpServer, Shutdown};

/// Response served by a mock object store.
pub struct StoreResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Start a programmable mock object store.
///
/// The handler receives the request path (bucket-prefixed, as the gateway
/// sends it) and decides the response.
#[allow(dead_code)]
pub async fn start_object_store<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = StoreResponse> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        let response = f(path).await;

                        let content_type_line = match &response.content_type {
                            Some(ct) => format!("Content-Type: {}\r\n", ct),
                            None => String::new(),
                        };
                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                            status_text(response.status),
                            response.body.len(),
                            content_type_line,
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&response.body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock store that declares a larger body than it sends.
///
/// Writes `prefix`, then closes the connection, so the reader observes a
/// mid-stream failure after `prefix.len()` bytes.
#[allow(dead_code)]
pub async fn start_truncating_store(addr: SocketAddr, declared_len: usize, prefix: Vec<u8>) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let prefix = prefix.clone();
                    tokio::spawn(async move {
                        if read_request_path(&mut socket).await.is_none() {
                            return;
                        }
                        let head = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            declared_len,
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&prefix).await;
                        let _ = socket.flush().await;
                        // Close early: declared_len bytes were promised.
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a gateway pointed at the given store and return its shutdown handle.
#[allow(dead_code)]
pub async fn start_gateway(proxy_addr: SocketAddr, store_addr: SocketAddr, bucket: &str) -> Shutdown {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.storage.endpoint = format!("http://{}", store_addr);
    config.storage.bucket = bucket.to_string();
    config.observability.metrics_enabled = false;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind(proxy_addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    shutdown
}

/// Deterministic pseudo-random body for byte-exact assertions.
#[allow(dead_code)]
pub fn object_body(seed: u8, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u64 * 31 + seed as u64 * 7 + 13) as u8)
        .collect()
}

async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
        if head.len() > 64 * 1024 {
            return None;
        }
    }
    let head = String::from_utf8_lossy(&head);
    let first_line = head.lines().next()?;
    first_line.split_whitespace().nth(1).map(str::to_string)
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        403 => "403 Forbidden",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}
