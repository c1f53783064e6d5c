//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn an upstream response into the client response
//! - Copy status and headers verbatim (minus hop-by-hop headers)
//! - Buffer or stream the body
//!
//! # Design Decisions
//! - Buffering is the default so a broken upstream body still maps to an envelope
//! - Streaming hands hyper's incoming body straight to the client body

use axum::{body::Body, response::Response};
use http_body_util::BodyExt;
use hyper::body::Incoming;

use crate::security::filter_response_headers;

/// Build the client response from an upstream response.
///
/// With `stream` unset the whole body is read first; a read failure is
/// returned to the caller instead of a truncated response.
pub async fn relay(upstream: Response<Incoming>, stream: bool) -> Result<Response, hyper::Error> {
    let (parts, incoming) = upstream.into_parts();

    let body = if stream {
        Body::new(incoming)
    } else {
        Body::from(incoming.collect().await?.to_bytes())
    };

    let mut response = Response::new(body);
    *response.status_mut() = parts.status;
    *response.headers_mut() = filter_response_headers(&parts.headers);
    Ok(response)
}
