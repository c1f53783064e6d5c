//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, uri, headers, body)
//!     → target.rs (base + path + ?query)
//!     → security::headers (strip host / hop-by-hop)
//!     → forwarder.rs (issue upstream call with timeout + redirects)
//!     → http::response (relay status, headers, body)
//!     → error.rs on failure (503 / 500 envelope)
//! ```

pub mod error;
pub mod forwarder;
pub mod target;

pub use error::{ErrorEnvelope, ProxyError};
pub use forwarder::{carries_body, UpstreamClient};
pub use target::UpstreamTarget;
