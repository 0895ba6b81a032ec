//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use soap_middleware::{HttpServer, MiddlewareConfig, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const ENDPOINT: &str = "/Intellect/ExecuteTransaction.asmx";

/// A request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub content_type: Option<String>,
    pub soap_action: Option<String>,
    pub body: String,
}

/// What the mock upstream does with a request.
pub enum MockReply {
    Respond(u16, String),
    /// Close the socket without answering.
    Drop,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start a mock upstream on an ephemeral port.
///
/// `f` receives the zero-based request index and the parsed request.
pub async fn start_programmable_upstream<F>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(usize, &CapturedRequest) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = captured.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let f = f.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let index = {
                    let mut seen = seen.lock().unwrap();
                    seen.push(request.clone());
                    seen.len() - 1
                };

                match f(index, &request) {
                    MockReply::Respond(status, body) => {
                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    MockReply::Drop => drop(socket),
                }
            });
        }
    });

    (addr, captured)
}

/// Start a mock upstream that always answers with `status` and `body`.
pub async fn start_mock_upstream(status: u16, body: &'static str) -> (SocketAddr, Captured) {
    start_programmable_upstream(move |_, _| MockReply::Respond(status, body.to_string())).await
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let mut content_type = None;
    let mut soap_action = None;
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match name.trim().to_ascii_lowercase().as_str() {
            "content-type" => content_type = Some(value),
            "soapaction" => soap_action = Some(value),
            "content-length" => content_length = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        method,
        target,
        content_type,
        soap_action,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Default config pointed at `upstream`.
pub fn middleware_config(upstream: SocketAddr) -> MiddlewareConfig {
    let mut config = MiddlewareConfig::default();
    config.upstream.target_url = format!("http://{}{}", upstream, ENDPOINT);
    config.upstream.soap_action = "http://tempuri.org/Execute".into();
    config.upstream.timeout_ms = 2_000;
    config.upstream.use_system_proxy = false;
    config
}

/// Start the middleware on an ephemeral port.
pub async fn start_middleware(config: MiddlewareConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
