use std::sync::Arc;

use fund_dashboard_core::{config::PublicSubgraphConfig, FundDashboard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub dashboard: FundDashboard,
    /// Endpoints advertised to browsers via `/api/config`.
    pub public_config: PublicSubgraphConfig,
}

impl AppState {
    pub fn new(dashboard: FundDashboard, public_config: PublicSubgraphConfig) -> Self {
        Self {
            dashboard,
            public_config,
        }
    }
}

pub fn init_tracing() {
    let log_format =
        std::env::var("DASHBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let dashboard =
        FundDashboard::from_config(&config.subgraph, config.subgraph_timeout, config.cache_ttl);
    tracing::info!(
        endpoint = %config.subgraph.http,
        source = dashboard.source_name(),
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Subgraph source ready"
    );
    Ok(Arc::new(AppState::new(dashboard, config.subgraph.public())))
}
