use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::quantity::{de, TokenQuantity};

/// A fund reference: address, name and outstanding shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_supply: TokenQuantity,
}

/// One NAV calculation snapshot of a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationUpdate {
    #[serde(deserialize_with = "de::timestamp")]
    pub timestamp: i64,

    /// Gross asset value, 18-decimal fixed point
    pub gav: TokenQuantity,

    /// Outstanding shares, 18-decimal fixed point
    pub total_supply: TokenQuantity,

    #[serde(deserialize_with = "de::decimal")]
    pub gross_share_price: f64,
}

/// Direction of an investment log entry.
///
/// Invest and redeem are matched case-insensitively; any other action is
/// kept verbatim so the log shows what the subgraph recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestmentAction {
    Invest,
    Redeem,
    Other(String),
}

impl InvestmentAction {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "invest" => InvestmentAction::Invest,
            "redeem" => InvestmentAction::Redeem,
            _ => InvestmentAction::Other(raw.trim().to_string()),
        }
    }

    /// Wire form: `invest`, `redeem`, or the raw action.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            InvestmentAction::Invest => "invest",
            InvestmentAction::Redeem => "redeem",
            InvestmentAction::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InvestmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentAction::Invest => write!(f, "Invest"),
            InvestmentAction::Redeem => write!(f, "Redeem"),
            InvestmentAction::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for InvestmentAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InvestmentAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(InvestmentAction::parse(&raw))
    }
}

/// Reference to an account by address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentLogEntry {
    pub id: String,
    #[serde(deserialize_with = "de::timestamp")]
    pub timestamp: i64,
    pub action: InvestmentAction,
    pub shares: TokenQuantity,
    pub owner: AccountRef,
}

/// An asset known to the subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
    pub symbol: String,
}

/// Balance of one asset held by a fund at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsLogEntry {
    #[serde(deserialize_with = "de::timestamp")]
    pub timestamp: i64,
    pub asset: AssetRef,
    #[serde(deserialize_with = "de::decimal")]
    pub holding: f64,
}

/// Everything the fund detail view needs, as returned by one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDetails {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub total_supply: TokenQuantity,
    #[serde(default)]
    pub calculations_updates: Vec<CalculationUpdate>,
    #[serde(default)]
    pub investment_log: Vec<InvestmentLogEntry>,
    #[serde(default)]
    pub holdings_log: Vec<HoldingsLogEntry>,
}

/// A fund's details together with the asset list used to name holdings
/// series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSnapshot {
    pub fund: FundDetails,
    pub assets: Vec<AssetRef>,
}
