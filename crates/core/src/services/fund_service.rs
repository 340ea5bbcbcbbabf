use std::collections::{BTreeMap, BTreeSet};

use crate::models::chart::{ChartSeries, GavChartPoint, HoldingsChartPoint, LineChart};
use crate::models::fund::{
    AssetRef, CalculationUpdate, FundDetails, FundSnapshot, HoldingsLogEntry, InvestmentLogEntry,
};
use crate::models::manager::FundManager;
use crate::models::quantity::DEFAULT_DISPLAY_PRECISION;
use crate::models::view::{FundRow, FundSummary, FundView, InvestmentLogLine, ManagerView};
use crate::services::format::{format_date, fund_url};

pub const GAV_CHART_TITLE: &str = "GAV / # Shares";
pub const SHARE_PRICE_CHART_TITLE: &str = "Share Price";
pub const CHANGE_CHART_TITLE: &str = "Daily change";
pub const HOLDINGS_CHART_TITLE: &str = "Fund holdings";

/// Generates the fund and manager detail views from raw subgraph records.
///
/// Every number is computed here, so renderers only draw:
/// - Formatted summary and normalized calculation updates
/// - Holdings regrouped to one record per timestamp
/// - The four line charts and the investment log
pub struct FundService {
    precision: u8,
}

impl FundService {
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_DISPLAY_PRECISION,
        }
    }

    /// Use a different number of fractional digits for quantities.
    pub fn with_precision(precision: u8) -> Self {
        Self { precision }
    }

    #[must_use]
    pub fn summary(&self, fund: &FundDetails) -> FundSummary {
        FundSummary {
            address: fund.id.clone(),
            name: fund.name.clone(),
            shares: fund.total_supply.to_fixed(self.precision),
        }
    }

    /// Relative share price change from `previous` to `current`.
    ///
    /// A zero previous price, or any ratio that is not finite, gives 0.
    #[must_use]
    pub fn share_price_change(previous: f64, current: f64) -> f64 {
        if previous == 0.0 {
            return 0.0;
        }
        let change = current / previous - 1.0;
        if change.is_finite() {
            change
        } else {
            0.0
        }
    }

    /// Normalize calculation updates for charting, keeping input order.
    /// The first point's change is 0.
    #[must_use]
    pub fn normalize_calculations(&self, updates: &[CalculationUpdate]) -> Vec<GavChartPoint> {
        updates
            .iter()
            .enumerate()
            .map(|(i, update)| {
                let change = if i == 0 {
                    0.0
                } else {
                    Self::share_price_change(
                        updates[i - 1].gross_share_price,
                        update.gross_share_price,
                    )
                };
                GavChartPoint {
                    timestamp: update.timestamp,
                    gav: update.gav.to_fixed(self.precision),
                    total_supply: update.total_supply.to_fixed(self.precision),
                    gav_value: update.gav.to_f64(),
                    total_supply_value: update.total_supply.to_f64(),
                    gross_share_price: update.gross_share_price,
                    change,
                }
            })
            .collect()
    }

    /// Group holdings into one record per distinct timestamp, ascending.
    ///
    /// Grouping is keyed on the timestamp value, so the input does not need
    /// to be sorted. For a repeated (timestamp, symbol) pair the later entry
    /// wins.
    #[must_use]
    pub fn group_holdings(&self, log: &[HoldingsLogEntry]) -> Vec<HoldingsChartPoint> {
        let mut grouped: BTreeMap<i64, BTreeMap<String, f64>> = BTreeMap::new();
        for entry in log {
            grouped
                .entry(entry.timestamp)
                .or_default()
                .insert(entry.asset.symbol.clone(), entry.holding);
        }

        grouped
            .into_iter()
            .map(|(timestamp, holdings)| HoldingsChartPoint {
                timestamp,
                holdings,
            })
            .collect()
    }

    /// Symbols to draw in the holdings chart: the known asset list plus
    /// anything that appears in the holdings log. Sorted, deduplicated.
    #[must_use]
    pub fn asset_symbols(&self, assets: &[AssetRef], log: &[HoldingsLogEntry]) -> Vec<String> {
        assets
            .iter()
            .map(|a| a.symbol.clone())
            .chain(log.iter().map(|e| e.asset.symbol.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Investment log in chronological order (stable for equal timestamps).
    #[must_use]
    pub fn investment_log(&self, log: &[InvestmentLogEntry]) -> Vec<InvestmentLogLine> {
        let mut entries: Vec<&InvestmentLogEntry> = log.iter().collect();
        entries.sort_by_key(|e| e.timestamp);
        entries
            .into_iter()
            .map(|e| InvestmentLogLine {
                id: e.id.clone(),
                timestamp: e.timestamp,
                date: format_date(e.timestamp),
                action: e.action.clone(),
                shares: e.shares.to_fixed(self.precision),
                owner: e.owner.id.clone(),
            })
            .collect()
    }

    /// Build the four fund charts.
    #[must_use]
    pub fn build_charts(
        &self,
        calculations: &[GavChartPoint],
        holdings: &[HoldingsChartPoint],
        symbols: &[String],
    ) -> Vec<LineChart> {
        let holdings_series = symbols
            .iter()
            .map(|symbol| ChartSeries {
                name: symbol.clone(),
                points: holdings
                    .iter()
                    .filter_map(|p| p.holding(symbol).map(|h| (p.timestamp, h)))
                    .collect(),
            })
            .collect();

        vec![
            LineChart {
                title: GAV_CHART_TITLE.to_string(),
                series: vec![
                    calculation_series(calculations, "gav", |p| p.gav_value),
                    calculation_series(calculations, "totalSupply", |p| {
                        p.total_supply_value
                    }),
                ],
            },
            LineChart {
                title: SHARE_PRICE_CHART_TITLE.to_string(),
                series: vec![calculation_series(
                    calculations,
                    "grossSharePrice",
                    |p| p.gross_share_price,
                )],
            },
            LineChart {
                title: CHANGE_CHART_TITLE.to_string(),
                series: vec![calculation_series(calculations, "change", |p| p.change)],
            },
            LineChart {
                title: HOLDINGS_CHART_TITLE.to_string(),
                series: holdings_series,
            },
        ]
    }

    /// Shape a fund snapshot into the complete detail view.
    #[must_use]
    pub fn fund_view(&self, snapshot: &FundSnapshot) -> FundView {
        let fund = &snapshot.fund;
        let calculations = self.normalize_calculations(&fund.calculations_updates);
        let holdings = self.group_holdings(&fund.holdings_log);
        let asset_symbols = self.asset_symbols(&snapshot.assets, &fund.holdings_log);
        let charts = self.build_charts(&calculations, &holdings, &asset_symbols);

        FundView {
            summary: self.summary(fund),
            investment_log: self.investment_log(&fund.investment_log),
            calculations,
            holdings,
            asset_symbols,
            charts,
        }
    }

    /// Shape a manager and its funds into the manager detail view.
    #[must_use]
    pub fn manager_view(&self, manager: &FundManager) -> ManagerView {
        ManagerView {
            address: manager.id.clone(),
            active_since: format_date(manager.created_at),
            created_at: manager.created_at,
            funds: manager
                .funds
                .iter()
                .map(|f| FundRow {
                    address: f.id.clone(),
                    name: f.name.clone(),
                    shares: f.total_supply.to_fixed(self.precision),
                    detail_url: fund_url(&f.id),
                })
                .collect(),
        }
    }
}

fn calculation_series(
    calculations: &[GavChartPoint],
    name: &str,
    value: fn(&GavChartPoint) -> f64,
) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        points: calculations.iter().map(|p| (p.timestamp, value(p))).collect(),
    }
}

impl Default for FundService {
    fn default() -> Self {
        Self::new()
    }
}
