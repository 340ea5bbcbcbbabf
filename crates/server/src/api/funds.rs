use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use fund_dashboard_core::models::view::FundView;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_fund(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<FundView>> {
    let view = state.dashboard.fund_view(&address).await?;
    Ok(Json(view))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/funds/{address}", get(get_fund))
}
