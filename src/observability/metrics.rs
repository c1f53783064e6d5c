//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded requests by method, status
//! - `gateway_request_duration_seconds` (histogram): latency by method
//! - `gateway_backend_healthy` (gauge): 1=healthy, 0=unavailable, set per probe
//!
//! Without an installed recorder every call here is a no-op.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one request handled by the proxy path.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    ::metrics::counter!(
        "gateway_requests_total",
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("gateway_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a liveness probe.
pub fn record_backend_health(healthy: bool) {
    ::metrics::gauge!("gateway_backend_healthy").set(if healthy { 1.0 } else { 0.0 });
}
