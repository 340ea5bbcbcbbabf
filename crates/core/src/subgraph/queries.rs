use serde::Deserialize;

use crate::models::fund::{AssetRef, FundDetails};
use crate::models::manager::FundManager;

pub const MANAGER_LIST_OPERATION: &str = "ManagerListQuery";
pub const MANAGER_DETAILS_OPERATION: &str = "ManagerDetailsQuery";
pub const FUND_DETAILS_OPERATION: &str = "FundDetailsQuery";

pub const MANAGER_LIST_QUERY: &str = r#"
query ManagerListQuery {
  fundManagers(first: 1000, orderBy: createdAt) {
    id
    createdAt
    funds {
      id
      name
      totalSupply
    }
  }
}
"#;

pub const MANAGER_DETAILS_QUERY: &str = r#"
query ManagerDetailsQuery($manager: ID!) {
  fundManager(id: $manager) {
    id
    createdAt
    funds {
      id
      name
      totalSupply
    }
  }
}
"#;

pub const FUND_DETAILS_QUERY: &str = r#"
query FundDetailsQuery($fund: ID!) {
  fund(id: $fund) {
    id
    name
    totalSupply
    calculationsUpdates(orderBy: timestamp, first: 1000) {
      timestamp
      gav
      totalSupply
      grossSharePrice
    }
    investmentLog(orderBy: timestamp, first: 1000) {
      id
      timestamp
      action
      shares
      owner {
        id
      }
    }
    holdingsLog(orderBy: timestamp, first: 1000) {
      timestamp
      holding
      asset {
        id
        symbol
      }
    }
  }
  assets(orderBy: symbol) {
    id
    symbol
  }
}
"#;

// ── Response `data` shapes ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerListData {
    #[serde(default)]
    pub fund_managers: Vec<FundManager>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDetailsData {
    pub fund_manager: Option<FundManager>,
}

#[derive(Debug, Deserialize)]
pub struct FundDetailsData {
    pub fund: Option<FundDetails>,
    #[serde(default)]
    pub assets: Vec<AssetRef>,
}
