use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use fund_dashboard_core::{errors::CoreError, models::view::Resource};
use serde::Deserialize;

use super::managers::ListingQuery;
use crate::{error::core_status, main_lib::AppState, render};

type Page = (StatusCode, Html<String>);

#[derive(Debug, Deserialize)]
struct AddressQuery {
    address: Option<String>,
}

/// Status for a page built from `result`; the page itself renders either way.
fn status_of<T>(result: &Result<T, CoreError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            let status = core_status(e);
            if status.is_server_error() {
                tracing::warn!(status = status.as_u16(), "page load failed: {}", e);
            }
            status
        }
    }
}

async fn listing_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> Page {
    let q = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            let listing = Resource::Failed(rejection.body_text());
            let body = render::listing::listing_page(&listing, Default::default());
            return (StatusCode::BAD_REQUEST, Html(body));
        }
    };
    let sort = match q.sort_spec() {
        Ok(sort) => sort,
        Err(e) => {
            let listing = Resource::Failed(e.to_string());
            let body = render::listing::listing_page(&listing, Default::default());
            return (core_status(&e), Html(body));
        }
    };
    let result = state.dashboard.manager_page(sort, q.page()).await;
    let status = status_of(&result);
    (
        status,
        Html(render::listing::listing_page(&Resource::from(result), sort)),
    )
}

async fn manager_page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<AddressQuery>,
) -> Page {
    let address = q.address.unwrap_or_default();
    let result = state.dashboard.manager_view(&address).await;
    let status = status_of(&result);
    (
        status,
        Html(render::manager::manager_page(address.trim(), &Resource::from(result))),
    )
}

async fn fund_page(State(state): State<Arc<AppState>>, Query(q): Query<AddressQuery>) -> Page {
    let address = q.address.unwrap_or_default();
    let result = state.dashboard.fund_view(&address).await;
    let status = status_of(&result);
    (
        status,
        Html(render::fund::fund_page(address.trim(), &Resource::from(result))),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(listing_page))
        .route("/manager", get(manager_page))
        .route("/fund", get(fund_page))
}
