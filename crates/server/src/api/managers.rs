use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use fund_dashboard_core::{
    errors::CoreError,
    models::{
        table::{ManagerPage, SortSpec},
        view::ManagerView,
    },
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

/// Query string of the manager listing, shared by the page and the API.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl ListingQuery {
    /// Zero-based page index, 0 when absent.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    pub fn sort_spec(&self) -> Result<SortSpec, CoreError> {
        let mut spec = SortSpec::default();
        if let Some(column) = non_blank(self.sort.as_deref()) {
            spec.column = column.parse()?;
        }
        if let Some(direction) = non_blank(self.dir.as_deref()) {
            spec.direction = direction.parse()?;
        }
        Ok(spec)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

async fn list_managers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> ApiResult<Json<ManagerPage>> {
    let Query(q) = query?;
    let sort = q.sort_spec()?;
    let page = state.dashboard.manager_page(sort, q.page()).await?;
    Ok(Json(page))
}

async fn get_manager(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<Json<ManagerView>> {
    let view = state.dashboard.manager_view(&address).await?;
    Ok(Json(view))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/managers", get(list_managers))
        .route("/managers/{address}", get(get_manager))
}
