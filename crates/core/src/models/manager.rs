use serde::{Deserialize, Serialize};

use super::fund::Fund;
use super::quantity::de;

/// A fund manager as indexed by the subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundManager {
    /// Manager address
    pub id: String,

    /// Unix timestamp (seconds) of the manager's first fund setup
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: i64,

    /// Funds set up by this manager, in subgraph order
    #[serde(default)]
    pub funds: Vec<Fund>,
}

impl FundManager {
    #[must_use]
    pub fn fund_count(&self) -> usize {
        self.funds.len()
    }
}
