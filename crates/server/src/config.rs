use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use fund_dashboard_core::{config::SubgraphConfig, subgraph::cache::DEFAULT_TTL};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    /// Upper bound for a whole incoming request.
    pub request_timeout: Duration,
    /// Outgoing subgraph queries; kept strictly below `request_timeout`.
    pub subgraph_timeout: Duration,
    /// Zero disables the query cache.
    pub cache_ttl: Duration,
    pub subgraph: SubgraphConfig,
}

impl Config {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("DASHBOARD_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid DASHBOARD_LISTEN_ADDR")?;
        let cors_allow = lookup("DASHBOARD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = lookup("DASHBOARD_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
            .max(2);
        let subgraph_timeout_ms = lookup("DASHBOARD_SUBGRAPH_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(timeout_ms * 4 / 5)
            .clamp(1, timeout_ms - 1);
        let cache_ttl_secs = lookup("DASHBOARD_CACHE_TTL_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TTL.as_secs());
        let subgraph = SubgraphConfig::from_lookup(&lookup)?;

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            subgraph_timeout: Duration::from_millis(subgraph_timeout_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            subgraph,
        })
    }
}
