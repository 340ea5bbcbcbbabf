use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Rows per page of the manager listing.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sortable columns of the manager listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    /// Manager address, lexical
    #[default]
    Address,
    /// Creation timestamp, numeric
    ActiveSince,
    /// Number of funds, numeric
    Funds,
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortColumn::Address => write!(f, "address"),
            SortColumn::ActiveSince => write!(f, "activeSince"),
            SortColumn::Funds => write!(f, "funds"),
        }
    }
}

impl FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "address" | "id" => Ok(SortColumn::Address),
            "activesince" | "active_since" | "createdat" => Ok(SortColumn::ActiveSince),
            "funds" | "fundcount" => Ok(SortColumn::Funds),
            other => Err(CoreError::ValidationError(format!(
                "Unknown sort column '{other}': expected address, activeSince or funds"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::ValidationError(format!(
                "Unknown sort direction '{other}': expected asc or desc"
            ))),
        }
    }
}

/// Sort applied to the manager listing. Defaults to address ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// One rendered row of the manager listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerRow {
    pub address: String,

    /// `MM/DD/YYYY` of `created_at`, display only
    pub active_since: String,

    /// Raw creation timestamp, used for sorting
    pub created_at: i64,

    pub fund_count: usize,

    /// Where activating this row navigates to
    pub detail_url: String,
}

/// One page of the sorted manager listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerPage {
    pub rows: Vec<ManagerRow>,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub sort: SortSpec,
}

impl ManagerPage {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0 && self.total_pages > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }
}
