pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod subgraph;

use std::time::Duration;

use config::SubgraphConfig;
use errors::CoreError;
use models::{
    table::{ManagerPage, SortSpec},
    view::{FundView, ManagerView, Resource},
};
use services::{fund_service::FundService, listing_service::ListingService};
use subgraph::{cache::CachedSubgraph, client::HttpSubgraphClient, traits::SubgraphSource};

/// Main entry point for the fund dashboard core library.
/// Holds the subgraph source and the services that shape its data into views.
#[must_use]
pub struct FundDashboard {
    source: Box<dyn SubgraphSource>,
    listing_service: ListingService,
    fund_service: FundService,
}

impl std::fmt::Debug for FundDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundDashboard")
            .field("source", &self.source.name())
            .field("page_size", &self.listing_service.page_size())
            .finish()
    }
}

impl FundDashboard {
    /// Create a dashboard over any subgraph source.
    pub fn new(source: Box<dyn SubgraphSource>) -> Self {
        Self {
            source,
            listing_service: ListingService::default(),
            fund_service: FundService::new(),
        }
    }

    /// Create a dashboard querying the configured HTTP endpoint, with a
    /// query cache in front of it unless `cache_ttl` is zero.
    pub fn from_config(config: &SubgraphConfig, timeout: Duration, cache_ttl: Duration) -> Self {
        let client = HttpSubgraphClient::with_timeout(config.http.clone(), timeout);
        if cache_ttl.is_zero() {
            Self::new(Box::new(client))
        } else {
            Self::new(Box::new(CachedSubgraph::new(client, cache_ttl)))
        }
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.listing_service = ListingService::new(page_size);
        self
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.listing_service.page_size()
    }

    // ── Manager Listing ─────────────────────────────────────────────

    /// Fetch all managers and return one sorted page of the listing.
    pub async fn manager_page(&self, sort: SortSpec, page: usize) -> Result<ManagerPage, CoreError> {
        let managers = self.source.fund_managers().await?;
        log::debug!("fetched {} fund managers", managers.len());
        self.listing_service.manager_page(&managers, sort, page)
    }

    /// Same as [`manager_page`](Self::manager_page), as a tri-state resource.
    pub async fn manager_listing(&self, sort: SortSpec, page: usize) -> Resource<ManagerPage> {
        self.manager_page(sort, page).await.into()
    }

    // ── Manager Detail ──────────────────────────────────────────────

    /// Fetch one manager and its funds.
    pub async fn manager_view(&self, address: &str) -> Result<ManagerView, CoreError> {
        let address = validate_address(address)?;
        let manager = self
            .source
            .fund_manager(address)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Fund manager".into(),
                id: address.to_string(),
            })?;
        Ok(self.fund_service.manager_view(&manager))
    }

    pub async fn manager_detail(&self, address: &str) -> Resource<ManagerView> {
        self.manager_view(address).await.into()
    }

    // ── Fund Detail ─────────────────────────────────────────────────

    /// Fetch one fund's time series and shape it into charts and logs.
    pub async fn fund_view(&self, address: &str) -> Result<FundView, CoreError> {
        let address = validate_address(address)?;
        let snapshot = self
            .source
            .fund_details(address)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Fund".into(),
                id: address.to_string(),
            })?;
        log::debug!(
            "fund {address}: {} calculation updates, {} holdings entries",
            snapshot.fund.calculations_updates.len(),
            snapshot.fund.holdings_log.len()
        );
        Ok(self.fund_service.fund_view(&snapshot))
    }

    pub async fn fund_detail(&self, address: &str) -> Resource<FundView> {
        self.fund_view(address).await.into()
    }
}

/// Trim an address query parameter and reject blank or malformed input.
pub fn validate_address(address: &str) -> Result<&str, CoreError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("Address must not be empty".into()));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::ValidationError(format!(
            "Invalid address '{trimmed}': must not contain whitespace"
        )));
    }
    Ok(trimmed)
}
