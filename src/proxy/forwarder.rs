//! Request forwarding to the upstream origin.
//!
//! # Responsibilities
//! - Own the shared HTTP client (connection pool, timeouts, redirect policy)
//! - Re-issue an inbound request against the upstream and relay the answer
//! - Probe the upstream liveness endpoint
//!
//! # Design Decisions
//! - Immutable after construction; shared via `Arc` with no locking
//! - No retries: a failed call is reported, the caller owns retry policy
//! - Timeouts count as unavailability (503), not as faults
//! - The hyper client adds no headers of its own beyond `host`, so the
//!   upstream sees the inbound header set minus the denylist

use axum::{
    body::Bytes,
    http::{header, request::Parts, HeaderValue, Method, Request, StatusCode, Uri},
    response::Response,
};
use http_body_util::Full;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;
use tower::ServiceExt;
use tower_http::follow_redirect::{
    policy::{Action, Attempt, Policy},
    FollowRedirect,
};

use crate::config::UpstreamConfig;
use crate::http::response::relay;
use crate::proxy::error::ProxyError;
use crate::proxy::target::UpstreamTarget;
use crate::security::filter_headers;

const USER_AGENT: &str = concat!("forwarding-gateway/", env!("CARGO_PKG_VERSION"));

type HttpClient = Client<HttpConnector, Full<Bytes>>;

/// Methods whose inbound body is read and forwarded. Every other method
/// is forwarded without a body, even if the client sent one.
pub fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Follows at most `remaining` redirects. Buffered bodies are re-sent on
/// 307/308 hops.
#[derive(Debug, Clone, Copy)]
struct RedirectLimit {
    remaining: usize,
}

impl<E> Policy<Full<Bytes>, E> for RedirectLimit {
    fn redirect(&mut self, _attempt: &Attempt<'_>) -> Result<Action, E> {
        if self.remaining == 0 {
            return Ok(Action::Stop);
        }
        self.remaining -= 1;
        Ok(Action::Follow)
    }

    fn clone_body(&self, body: &Full<Bytes>) -> Option<Full<Bytes>> {
        Some(body.clone())
    }
}

/// Client bound to one upstream origin.
#[derive(Clone)]
pub struct UpstreamClient {
    forwarding: FollowRedirect<HttpClient, RedirectLimit>,
    /// Same connection pool, no redirect handling: a 3xx liveness answer
    /// is unhealthy.
    probing: HttpClient,
    target: UpstreamTarget,
    liveness_path: String,
    request_timeout: Duration,
    health_timeout: Duration,
    stream_responses: bool,
}

impl UpstreamClient {
    /// Build the client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(config.connect_timeout()));
        let client: HttpClient = Client::builder(TokioExecutor::new()).build(connector);

        let redirects = RedirectLimit {
            remaining: if config.follow_redirects {
                config.max_redirects
            } else {
                0
            },
        };

        Self {
            forwarding: FollowRedirect::with_policy(client.clone(), redirects),
            probing: client,
            target: UpstreamTarget::new(&config.base_url, config.name.clone()),
            liveness_path: config.liveness_path.clone(),
            request_timeout: config.request_timeout(),
            health_timeout: config.health_timeout(),
            stream_responses: config.stream_responses,
        }
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Forward one request. `body` is attached as-is when present.
    ///
    /// The request timeout covers the upstream call and, when buffering,
    /// reading the upstream body.
    pub async fn forward(&self, parts: &Parts, body: Option<Bytes>) -> Result<Response, ProxyError> {
        let url = self.target.url_for(&parts.uri);
        let uri: Uri = url
            .parse()
            .map_err(|e| ProxyError::Fault(format!("invalid upstream URL `{}`: {}", url, e)))?;

        let mut request = Request::new(body.map(Full::new).unwrap_or_default());
        *request.method_mut() = parts.method.clone();
        *request.uri_mut() = uri;
        *request.headers_mut() = filter_headers(&parts.headers);

        let exchange = async {
            let upstream = self
                .forwarding
                .clone()
                .oneshot(request)
                .await
                .map_err(|e| ProxyError::from_client(e, &self.target))?;

            tracing::debug!(
                url = %url,
                status = %upstream.status(),
                "Upstream responded"
            );

            relay(upstream, self.stream_responses)
                .await
                .map_err(|e| ProxyError::Fault(format!("failed to read upstream body: {}", e)))
        };

        tokio::time::timeout(self.request_timeout, exchange)
            .await
            .map_err(|elapsed| ProxyError::unavailable(&self.target, elapsed))?
    }

    /// One GET against the liveness path. Healthy means exactly 200 within
    /// the health timeout; redirects are not followed and every failure is
    /// folded into `false`.
    pub async fn probe(&self) -> bool {
        let url = self.target.url_for_path(&self.liveness_path);

        let request = match Request::get(url.as_str())
            .header(header::USER_AGENT, HeaderValue::from_static(USER_AGENT))
            .body(Full::default())
        {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Health check failed: invalid URL");
                return false;
            }
        };

        match tokio::time::timeout(self.health_timeout, self.probing.request(request)).await {
            Ok(Ok(response)) if response.status() == StatusCode::OK => true,
            Ok(Ok(response)) => {
                tracing::warn!(url = %url, status = %response.status(), "Health check failed: non-200 status");
                false
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Health check failed: connection error");
                false
            }
            Err(_) => {
                tracing::warn!(url = %url, "Health check failed: timeout");
                false
            }
        }
    }
}
