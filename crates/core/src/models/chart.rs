use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A normalized calculation update, ready for the GAV, share price and
/// daily change charts.
///
/// All numbers are computed here; renderers only draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GavChartPoint {
    /// Unix timestamp (seconds)
    pub timestamp: i64,

    /// Gross asset value formatted to display precision
    pub gav: String,

    /// Outstanding shares formatted to display precision
    pub total_supply: String,

    /// Numeric gav for plotting
    pub gav_value: f64,

    /// Numeric total supply for plotting
    pub total_supply_value: f64,

    pub gross_share_price: f64,

    /// Relative share price change versus the previous point (0.1 = +10%)
    pub change: f64,
}

/// All asset balances of a fund at one timestamp.
///
/// Serializes flat: `{"timestamp": 1, "ETH": 5.0, "DAI": 10.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsChartPoint {
    pub timestamp: i64,

    #[serde(flatten)]
    pub holdings: BTreeMap<String, f64>,
}

impl HoldingsChartPoint {
    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<f64> {
        self.holdings.get(symbol).copied()
    }
}

/// One line of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    /// (timestamp, value) pairs in ascending timestamp order
    pub points: Vec<(i64, f64)>,
}

/// A titled line chart with one or more series sharing a time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Min and max timestamp across all series.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(i64, i64)> {
        let mut stamps = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Min and max of all finite values across all series.
    #[must_use]
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
