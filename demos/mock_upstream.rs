//! A pretend upstream for trying the gateway by hand.
//!
//! ```text
//! cargo run --example mock_upstream
//! cargo run -- --upstream http://127.0.0.1:8002
//! curl -i localhost:8001/health
//! curl -i -X POST localhost:8001/api/v1/login -d '{"email":"a@b.com","password":"x"}'
//! ```

use axum::{
    body::Bytes,
    http::{HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<serde_json::Value> {
    let headers: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().into()))
        .collect();

    Json(serde_json::json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route(
            "/api/v1/test",
            get(|| async { Json(serde_json::json!({ "status": "success" })) }),
        )
        .fallback(echo);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8002));
    println!("Mock upstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
