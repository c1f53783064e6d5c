//! Forwarding Gateway
//!
//! Relays every inbound HTTP request to a fixed upstream origin and returns
//! the upstream's answer unchanged.
//!
//! # Architecture Overview
//!
//! ```text
//! Client ──▶ CORS ──▶ trace span ──▶ path == /health ?
//!                                      │yes                 │no
//!                                      ▼                    ▼
//!                              probe liveness path   url = base + path + ?query
//!                                      │             headers - host/hop-by-hop
//!                                      │             body (POST/PUT/PATCH only)
//!                                      │                    │
//!                                      ▼                    ▼
//!                              200 {healthy|partial}   upstream call (30s)
//!                                                           │
//!                                       relay status/headers/body | 503 | 500
//! ```

use clap::Parser;
use std::path::PathBuf;

use forwarding_gateway::config::{load_config, validate_config, ConfigError, GatewayConfig};
use forwarding_gateway::lifecycle::startup;
use forwarding_gateway::observability::init_logging;

#[derive(Parser)]
#[command(name = "forwarding-gateway")]
#[command(about = "Transparent HTTP gateway in front of a single upstream", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(short, long)]
    upstream: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(upstream) = self.upstream {
            config.upstream.base_url = upstream;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability);
    tracing::info!("forwarding-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
