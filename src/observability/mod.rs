//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers and the health probe produce:
//!     → logging.rs (structured log events, per-request span with request ID)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
