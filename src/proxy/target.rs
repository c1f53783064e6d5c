//! Upstream target URL construction.

use axum::http::Uri;

/// The fixed upstream origin every forwarded request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    base: String,
    name: String,
}

impl UpstreamTarget {
    /// Trailing slashes on `base_url` are dropped so joins never produce `//`.
    pub fn new(base_url: &str, name: impl Into<String>) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
            name: name.into(),
        }
    }

    /// Base URL as configured, minus trailing slashes.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Display name used in error envelopes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upstream URL for an inbound request URI: base + path + `?query`.
    /// An empty query adds no `?`.
    pub fn url_for(&self, uri: &Uri) -> String {
        let mut url = self.url_for_path(uri.path());
        if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    /// Upstream URL for a bare path.
    pub fn url_for_path(&self, path: &str) -> String {
        let mut url = String::with_capacity(self.base.len() + path.len());
        url.push_str(&self.base);
        url.push_str(path);
        url
    }
}
