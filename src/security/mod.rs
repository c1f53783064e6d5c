//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (answer preflights, add CORS headers to responses)
//!     → headers.rs (strip host and hop-by-hop headers before forwarding)
//!     → Pass to upstream
//! ```

pub mod cors;
pub mod headers;

pub use cors::{cors, cors_layer};
pub use headers::{filter_headers, filter_response_headers};
