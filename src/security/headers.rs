//! Header filtering between the client and upstream hops.
//!
//! # Responsibilities
//! - Strip `host` so the upstream sees its own authority, not the gateway's
//! - Strip hop-by-hop and framing headers that describe one connection only
//! - Leave every end-to-end header untouched, multi-valued ones included
//!
//! # Design Decisions
//! - Explicit denylist instead of an allowlist: unknown headers pass through
//! - `content-length` is recomputed by whichever side re-frames the body
//! - Responses keep `content-length`; the body is relayed unchanged

use axum::http::header::{HeaderMap, HeaderName, CONTENT_LENGTH};

/// Headers never copied across the gateway. Lowercase, as `HeaderName` stores them.
pub const DENYLIST: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Returns true if `name` must not cross the gateway.
pub fn is_denied(name: &HeaderName) -> bool {
    DENYLIST.contains(&name.as_str())
}

/// Copy inbound request headers for the upstream, dropping everything on the denylist.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    copy_except(headers, is_denied)
}

/// Copy upstream response headers for the client.
///
/// `content-length` is kept: the body is relayed byte-for-byte, and a HEAD
/// response has no body to recompute it from.
pub fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    copy_except(headers, |name| *name != CONTENT_LENGTH && is_denied(name))
}

fn copy_except(headers: &HeaderMap, denied: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if !denied(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}
