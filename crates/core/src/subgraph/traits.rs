use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::fund::FundSnapshot;
use crate::models::manager::FundManager;

/// Read-only access to the fund subgraph.
///
/// The HTTP client implements this against a live endpoint; the cache wraps
/// any other implementation, and tests plug in in-memory sources.
#[async_trait]
pub trait SubgraphSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// All fund managers with their funds.
    async fn fund_managers(&self) -> Result<Vec<FundManager>, CoreError>;

    /// One manager by address. `Ok(None)` when the subgraph has no such manager.
    async fn fund_manager(&self, address: &str) -> Result<Option<FundManager>, CoreError>;

    /// One fund's time series plus the known asset list.
    /// `Ok(None)` when the subgraph has no such fund.
    async fn fund_details(&self, address: &str) -> Result<Option<FundSnapshot>, CoreError>;
}
