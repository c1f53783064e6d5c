//! Proxy failure taxonomy and the JSON error envelope.
//!
//! An upstream that answers, whatever the status, is not an error here; its
//! response is relayed. Only failures to get an answer at all end up in
//! [`ProxyError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

use crate::proxy::target::UpstreamTarget;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, DNS failure, network down or timed out.
    #[error("{name} is not available")]
    UpstreamUnavailable {
        name: String,
        base_url: String,
        #[source]
        source: BoxError,
    },

    /// Anything else while building, issuing or relaying the request.
    #[error("Proxy error: {0}")]
    Fault(String),
}

impl ProxyError {
    /// Classify a client error from a call to `target`. Only connect
    /// failures mean the upstream is unavailable.
    pub fn from_client(err: hyper_util::client::legacy::Error, target: &UpstreamTarget) -> Self {
        if err.is_connect() {
            Self::unavailable(target, err)
        } else {
            let detail = match err.source() {
                Some(cause) => format!("{}: {}", err, cause),
                None => err.to_string(),
            };
            ProxyError::Fault(detail)
        }
    }

    /// The upstream could not be reached (or did not answer in time).
    pub fn unavailable(target: &UpstreamTarget, source: impl Into<BoxError>) -> Self {
        ProxyError::UpstreamUnavailable {
            name: target.name().to_string(),
            base_url: target.base().to_string(),
            source: source.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let upstream_url = match self {
            ProxyError::UpstreamUnavailable { base_url, .. } => Some(base_url.clone()),
            ProxyError::Fault(_) => None,
        };
        ErrorEnvelope {
            status: "error".to_string(),
            message: self.to_string(),
            upstream_url,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

/// Body returned whenever the gateway answers on the upstream's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_url: Option<String>,
}
