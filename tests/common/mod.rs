//! Shared utilities for integration tests: a mock upstream and a gateway launcher.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use forwarding_gateway::{GatewayConfig, HttpServer, Shutdown};

/// What the echo route saw, returned as its JSON body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Header the echo route sets so HEAD requests can still report body size.
pub const ECHO_BODY_LENGTH: &str = "x-echo-body-length";

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    ([(ECHO_BODY_LENGTH, body.len().to_string())], Json(echo)).into_response()
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {}", code)).into_response()
}

async fn slow(Path((ms, tag)): Path<(u64, String)>) -> String {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    format!("tag:{}", tag)
}

async fn marked() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::HeaderName::from_static("x-upstream-marker"), "yes"),
        ],
        "marked",
    )
        .into_response()
}

async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "success" }))
}

/// Start a mock upstream on an ephemeral port.
pub async fn start_mock_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/test", get(liveness))
        .route("/status/{code}", any(status))
        .route("/slow/{ms}/{tag}", any(slow))
        .route("/redirect", get(|| async { Redirect::temporary("/api/v1/test") }))
        .route("/marked", get(marked))
        .fallback(echo)
        .layer(DefaultBodyLimit::disable());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Gateway config pointing at `upstream`.
pub fn gateway_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = format!("http://{}", upstream);
    config
}

/// A running gateway; shuts down when dropped.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

/// Send `request` verbatim over a fresh connection and return the response
/// head and body. The request should carry `Connection: close`.
pub async fn raw_request(addr: SocketAddr, request: &str) -> (String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8_lossy(&response[..split]).into_owned();
    (head, response[split + 4..].to_vec())
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
