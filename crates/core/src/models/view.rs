use serde::{Deserialize, Serialize};

use super::chart::{GavChartPoint, HoldingsChartPoint, LineChart};
use super::fund::InvestmentAction;
use crate::errors::CoreError;

/// State of a fetched resource.
///
/// Keeps "not fetched yet" apart from "fetch failed": a failed fetch is
/// never rendered as an empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum Resource<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Loading
    }
}

impl<T> Resource<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Resource::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Failed(message) => Resource::Failed(message),
            Resource::Ready(value) => Resource::Ready(f(value)),
        }
    }
}

impl<T> From<Result<T, CoreError>> for Resource<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(value) => Resource::Ready(value),
            Err(e) => Resource::Failed(e.to_string()),
        }
    }
}

/// Header block of the fund detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    pub address: String,
    pub name: String,
    /// Share count formatted from the 18-decimal total supply
    pub shares: String,
}

/// One line of the textual investment log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentLogLine {
    pub id: String,
    pub timestamp: i64,
    pub date: String,
    pub action: InvestmentAction,
    pub shares: String,
    pub owner: String,
}

impl InvestmentLogLine {
    /// `<date> - <action> - <shares> - <owner>`
    #[must_use]
    pub fn to_text(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.date, self.action, self.shares, self.owner
        )
    }
}

/// Fully shaped fund detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundView {
    pub summary: FundSummary,
    pub calculations: Vec<GavChartPoint>,
    pub holdings: Vec<HoldingsChartPoint>,
    /// Series names of the holdings chart, sorted
    pub asset_symbols: Vec<String>,
    pub investment_log: Vec<InvestmentLogLine>,
    /// GAV + supply, share price, daily change, holdings
    pub charts: Vec<LineChart>,
}

/// One fund row of the manager detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRow {
    pub address: String,
    pub name: String,
    pub shares: String,
    pub detail_url: String,
}

/// Manager detail view: the manager and the funds it set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerView {
    pub address: String,
    pub active_since: String,
    pub created_at: i64,
    pub funds: Vec<FundRow>,
}
