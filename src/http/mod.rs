//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, tracing, /health vs. everything else)
//!     → request.rs (request ID + span)
//!     → proxy::forwarder (upstream call)
//!     → response.rs (relay status, headers, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, HEALTH_PATH};
