//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use explorer_client::blockchain::{ChainReader, Endpoints};
use explorer_client::http::{Fetcher, RecordingObserver};
use explorer_client::resilience::RetryPolicy;

/// Path prefix under which the mock serves the API.
pub const API_PREFIX: &str = "/api";

/// Canned response for one request.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
    /// Declare more body bytes than are sent, then hold the connection open.
    pub stall_body: bool,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn json(value: &Value) -> Self {
        Self::ok(value.to_string())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            stall_body: false,
        }
    }

    pub fn not_found() -> Self {
        Self::status(404, "not found")
    }

    /// Hold the response back for `delay` before writing anything.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Send the head and a partial body, then never finish the body.
    pub fn stalled_body(mut self) -> Self {
        self.stall_body = true;
        self
    }
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Paths (relative to the API prefix) requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }
}

/// Start a programmable mock backend on an ephemeral port. `f` receives the
/// request path with `API_PREFIX` stripped.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let backend = MockBackend {
        addr,
        requests: requests.clone(),
    };
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        let path = path
                            .strip_prefix(API_PREFIX)
                            .unwrap_or(&path)
                            .to_string();
                        requests.lock().unwrap().push(path.clone());

                        let response = f(path).await;
                        if !response.delay.is_zero() {
                            tokio::time::sleep(response.delay).await;
                        }

                        let declared_len = if response.stall_body {
                            response.body.len() + 96
                        } else {
                            response.body.len()
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(response.status),
                            declared_len,
                            response.body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        if response.stall_body {
                            let _ = socket.flush().await;
                            tokio::time::sleep(Duration::from_secs(10)).await;
                        }
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    backend
}

async fn read_request_path(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        405 => "405 Method Not Allowed",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        501 => "501 Not Implemented",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Short timeouts and backoff so failure paths finish quickly.
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(
        max_attempts,
        Duration::from_millis(1_000),
        Duration::from_millis(1),
    )
}

/// A fetcher pointed at nothing in particular, recording its attempts.
pub fn recording_fetcher(policy: RetryPolicy) -> (Fetcher, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::new());
    let fetcher = Fetcher::new(reqwest::Client::new(), policy).with_observer(observer.clone());
    (fetcher, observer)
}

/// A chain reader against `backend`.
pub fn reader(backend: &MockBackend, policy: RetryPolicy) -> (ChainReader, Arc<RecordingObserver>) {
    let (fetcher, observer) = recording_fetcher(policy);
    let endpoints = Endpoints::parse(&backend.base_url()).unwrap();
    (ChainReader::new(fetcher, endpoints), observer)
}

/// Upstream-shaped transaction JSON.
pub fn tx_json(txid: &str, outputs: &[(Option<&str>, u64)], block_height: Option<u64>) -> Value {
    let vout: Vec<Value> = outputs
        .iter()
        .map(|(address, value)| match address {
            Some(address) => json!({
                "scriptpubkey": "0014deadbeef",
                "scriptpubkey_address": address,
                "value": value
            }),
            None => json!({ "scriptpubkey": "6a", "value": value }),
        })
        .collect();

    let status = match block_height {
        Some(height) => json!({ "confirmed": true, "block_height": height, "block_hash": "00" }),
        None => json!({ "confirmed": false }),
    };

    json!({ "txid": txid, "version": 2, "fee": 141, "vout": vout, "status": status })
}

/// A page of `len` transactions with txids `{prefix}-{index}`.
pub fn page_json(prefix: &str, start: usize, len: usize) -> Value {
    Value::Array(
        (start..start + len)
            .map(|i| tx_json(&format!("{prefix}-{i}"), &[(Some("tb1qpeer"), 1_000)], Some(10)))
            .collect(),
    )
}
