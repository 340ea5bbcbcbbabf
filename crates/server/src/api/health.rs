use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use fund_dashboard_core::config::PublicSubgraphConfig;
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub source: String,
    pub version: &'static str,
}

/// Liveness only; the subgraph is not queried.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        source: state.dashboard.source_name().to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Subgraph endpoints a browser should use.
async fn public_config(State(state): State<Arc<AppState>>) -> Json<PublicSubgraphConfig> {
    Json(state.public_config.clone())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(public_config))
}
