//! Health report returned by `/health`.

use serde::{Deserialize, Serialize};

/// Combined availability: the gateway answered, so it is at least partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Healthy,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub proxy: String,
    pub backend: BackendStatus,
    pub backend_url: String,
}

impl HealthReport {
    pub fn new(backend_healthy: bool, backend_url: impl Into<String>) -> Self {
        let (status, backend) = if backend_healthy {
            (OverallStatus::Healthy, BackendStatus::Healthy)
        } else {
            (OverallStatus::Partial, BackendStatus::Unavailable)
        };

        Self {
            status,
            proxy: "running".to_string(),
            backend,
            backend_url: backend_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_report_shape() {
        let json = serde_json::to_value(HealthReport::new(true, "http://localhost:8002")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "proxy": "running",
                "backend": "healthy",
                "backend_url": "http://localhost:8002",
            })
        );
    }

    #[test]
    fn unhealthy_backend_is_partial() {
        let report = HealthReport::new(false, "http://localhost:8002");
        assert_eq!(report.status, OverallStatus::Partial);
        assert_eq!(report.backend, BackendStatus::Unavailable);
        assert_eq!(report.proxy, "running");
    }
}
