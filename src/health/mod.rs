//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → proxy::UpstreamClient::probe (one GET to the liveness path, short timeout)
//!     → report.rs (healthy | partial)
//!     → always HTTP 200; state travels in the body
//! ```
//!
//! # Design Decisions
//! - Computed per call, never cached or stored
//! - Probe failures never propagate to the caller
//! - "partial" separates a broken dependency from a broken gateway

pub mod report;

pub use report::{BackendStatus, HealthReport, OverallStatus};

use crate::observability::metrics;
use crate::proxy::UpstreamClient;

/// Probe the upstream once and build the report.
pub async fn check(upstream: &UpstreamClient) -> HealthReport {
    let healthy = upstream.probe().await;
    metrics::record_backend_health(healthy);
    HealthReport::new(healthy, upstream.target().base())
}
