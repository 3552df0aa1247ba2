//! Shared utilities for integration testing.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    http::{Method, StatusCode},
    response::IntoResponse,
    Router,
};
use cors_proxy::{HttpServer, ProxyHandler, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Request heads received by a raw backend, in arrival order.
pub type Received = Arc<Mutex<Vec<String>>>;

/// Start a backend that answers every connection with `response`, written raw.
///
/// The request head is read and recorded first; request bodies are not expected.
pub async fn start_raw_backend(response: &'static str) -> (SocketAddr, Received) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Received::default();
    let heads = received.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let heads = heads.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                heads.lock().unwrap().push(String::from_utf8_lossy(&head).into_owned());
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, received)
}

/// Send `head` to `addr` over a fresh connection and return the whole reply.
///
/// Bypasses client-side URL handling so the request-target reaches the
/// proxy byte-for-byte.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, head: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(head.as_bytes()).await.unwrap();

    let mut reply = Vec::new();
    socket.read_to_end(&mut reply).await.unwrap();
    String::from_utf8_lossy(&reply).into_owned()
}

/// First line of a recorded request head.
#[allow(dead_code)]
pub fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}

/// Start a backend that echoes the request body and reports the method in `X-Method`.
#[allow(dead_code)]
pub async fn start_echo_backend() -> SocketAddr {
    async fn echo(method: Method, body: Bytes) -> impl IntoResponse {
        (StatusCode::OK, [("x-method", method.to_string())], body)
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Serve `handler` on an ephemeral port.
pub async fn start_proxy(handler: ProxyHandler) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = HttpServer::new(handler).run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Test client that talks to the proxy directly.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// In-memory activity log sink.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl Capture {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
