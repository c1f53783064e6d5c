//! Forwarding gateway library.
//!
//! A transparent reverse proxy in front of one upstream application server,
//! plus a local `/health` endpoint reporting gateway and backend availability.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod security;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
