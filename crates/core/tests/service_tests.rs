// ═══════════════════════════════════════════════════════════════════
// Service Tests — ListingService, FundService, formatting helpers
// ═══════════════════════════════════════════════════════════════════

use std::cmp::Ordering;

use fund_dashboard_core::errors::CoreError;
use fund_dashboard_core::models::fund::{
    AccountRef, AssetRef, CalculationUpdate, Fund, FundDetails, FundSnapshot, HoldingsLogEntry,
    InvestmentAction, InvestmentLogEntry,
};
use fund_dashboard_core::models::manager::FundManager;
use fund_dashboard_core::models::quantity::TokenQuantity;
use fund_dashboard_core::models::table::{SortColumn, SortDirection, SortSpec};
use fund_dashboard_core::services::format::{
    format_date, format_percent, fund_url, manager_url,
};
use fund_dashboard_core::services::fund_service::{
    FundService, CHANGE_CHART_TITLE, GAV_CHART_TITLE, HOLDINGS_CHART_TITLE,
    SHARE_PRICE_CHART_TITLE,
};
use fund_dashboard_core::services::listing_service::ListingService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

/// 2020-12-31T00:00:00Z
const DEC_31_2020: i64 = 1_609_372_800;
/// 2021-01-01T00:00:00Z
const JAN_01_2021: i64 = 1_609_459_200;

const ONE: u128 = 1_000_000_000_000_000_000;

fn make_fund(id: &str) -> Fund {
    Fund {
        id: id.to_string(),
        name: format!("Fund {id}"),
        total_supply: TokenQuantity::shares(ONE),
    }
}

fn make_manager(id: &str, created_at: i64, funds: usize) -> FundManager {
    FundManager {
        id: id.to_string(),
        created_at,
        funds: (0..funds).map(|i| make_fund(&format!("{id}-f{i}"))).collect(),
    }
}

fn make_update(timestamp: i64, price: f64) -> CalculationUpdate {
    CalculationUpdate {
        timestamp,
        gav: TokenQuantity::shares(2 * ONE),
        total_supply: TokenQuantity::shares(ONE),
        gross_share_price: price,
    }
}

fn make_holding(timestamp: i64, symbol: &str, holding: f64) -> HoldingsLogEntry {
    HoldingsLogEntry {
        timestamp,
        asset: AssetRef {
            id: format!("0x{}", symbol.to_lowercase()),
            symbol: symbol.to_string(),
        },
        holding,
    }
}

fn make_investment(id: &str, timestamp: i64, action: InvestmentAction) -> InvestmentLogEntry {
    InvestmentLogEntry {
        id: id.to_string(),
        timestamp,
        action,
        shares: TokenQuantity::shares(ONE / 2),
        owner: AccountRef {
            id: "0xowner".into(),
        },
    }
}

fn addresses(page: &fund_dashboard_core::models::table::ManagerPage) -> Vec<&str> {
    page.rows.iter().map(|r| r.address.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════════
// Formatting
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn format_date_is_month_day_year_utc() {
        assert_eq!(format_date(DEC_31_2020), "12/31/2020");
        assert_eq!(format_date(JAN_01_2021), "01/01/2021");
        assert_eq!(format_date(0), "01/01/1970");
    }

    #[test]
    fn format_date_out_of_range_falls_back_to_number() {
        assert_eq!(format_date(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn manager_url_carries_address() {
        assert_eq!(manager_url("0xABC"), "/manager?address=0xABC");
    }

    #[test]
    fn urls_percent_encode_reserved_characters() {
        assert_eq!(fund_url("a&b"), "/fund?address=a%26b");
    }

    #[test]
    fn format_percent_signs_and_scales() {
        assert_eq!(format_percent(0.1), "+10.00%");
        assert_eq!(format_percent(-0.05), "-5.00%");
        assert_eq!(format_percent(f64::NAN), "—");
    }
}

// ═══════════════════════════════════════════════════════════════════
// ListingService
// ═══════════════════════════════════════════════════════════════════

mod listing {
    use super::*;

    #[test]
    fn one_row_per_manager_sorted_by_address_by_default() {
        let managers = vec![
            make_manager("0xc", 3, 1),
            make_manager("0xa", 1, 2),
            make_manager("0xb", 2, 0),
        ];
        let page = ListingService::default()
            .manager_page(&managers, SortSpec::default(), 0)
            .unwrap();

        assert_eq!(page.rows.len(), 3);
        assert_eq!(addresses(&page), vec!["0xa", "0xb", "0xc"]);
        assert_eq!(page.total_rows, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn rows_carry_display_and_raw_values() {
        let rows = ListingService::default().build_rows(&[make_manager("0xABC", DEC_31_2020, 2)]);
        let row = &rows[0];
        assert_eq!(row.active_since, "12/31/2020");
        assert_eq!(row.created_at, DEC_31_2020);
        assert_eq!(row.fund_count, 2);
        assert_eq!(row.detail_url, "/manager?address=0xABC");
    }

    #[test]
    fn active_since_sorts_numerically_not_lexically() {
        let svc = ListingService::default();
        let rows = svc.build_rows(&[
            make_manager("0x1", JAN_01_2021, 0),
            make_manager("0x2", DEC_31_2020, 0),
        ]);
        // Lexically "01/01/2021" < "12/31/2020", which would be wrong.
        assert!(rows[0].active_since < rows[1].active_since);

        let sort = SortSpec::new(SortColumn::ActiveSince, SortDirection::Asc);
        assert_eq!(ListingService::compare(&rows[1], &rows[0], sort), Ordering::Less);

        let page = svc
            .manager_page(
                &[make_manager("0x1", JAN_01_2021, 0), make_manager("0x2", DEC_31_2020, 0)],
                sort,
                0,
            )
            .unwrap();
        assert_eq!(addresses(&page), vec!["0x2", "0x1"]);
    }

    #[test]
    fn active_since_handles_different_digit_counts() {
        // 999 vs 1000 would also sort wrong as strings
        let managers = vec![make_manager("0x1", 1000, 0), make_manager("0x2", 999, 0)];
        let page = ListingService::default()
            .manager_page(
                &managers,
                SortSpec::new(SortColumn::ActiveSince, SortDirection::Asc),
                0,
            )
            .unwrap();
        assert_eq!(addresses(&page), vec!["0x2", "0x1"]);
    }

    #[test]
    fn descending_sort_reverses() {
        let managers = vec![
            make_manager("0xa", 1, 1),
            make_manager("0xb", 2, 3),
            make_manager("0xc", 3, 2),
        ];
        let page = ListingService::default()
            .manager_page(&managers, SortSpec::new(SortColumn::Funds, SortDirection::Desc), 0)
            .unwrap();
        assert_eq!(addresses(&page), vec!["0xb", "0xc", "0xa"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let managers = vec![
            make_manager("0xz", 5, 1),
            make_manager("0xa", 5, 1),
            make_manager("0xm", 5, 1),
        ];
        let page = ListingService::default()
            .manager_page(&managers, SortSpec::new(SortColumn::Funds, SortDirection::Asc), 0)
            .unwrap();
        assert_eq!(addresses(&page), vec!["0xz", "0xa", "0xm"]);
    }

    #[test]
    fn pagination_splits_into_fixed_pages() {
        let managers: Vec<FundManager> = (0..45)
            .map(|i| make_manager(&format!("0x{i:03}"), i, 0))
            .collect();
        let svc = ListingService::default();

        let first = svc.manager_page(&managers, SortSpec::default(), 0).unwrap();
        assert_eq!(first.page_size, 20);
        assert_eq!(first.rows.len(), 20);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.rows[0].address, "0x000");
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = svc.manager_page(&managers, SortSpec::default(), 2).unwrap();
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.rows[0].address, "0x040");
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let managers = vec![make_manager("0xa", 1, 0)];
        let page = ListingService::default()
            .manager_page(&managers, SortSpec::default(), 7)
            .unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_rows, 1);
        assert_eq!(page.page, 7);
    }

    #[test]
    fn empty_list_yields_zero_rows() {
        let page = ListingService::default()
            .manager_page(&[], SortSpec::default(), 0)
            .unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(page.total_rows, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ListingService::new(0)
            .manager_page(&[], SortSpec::default(), 0)
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let managers = vec![make_manager("0xa", 1, 0)];
        let page = ListingService::default()
            .manager_page(&managers, SortSpec::default(), usize::MAX)
            .unwrap();
        assert!(page.rows.is_empty());
        assert!(!page.has_next());
        assert!(page.has_previous());
    }
}

// ═══════════════════════════════════════════════════════════════════
// FundService — calculation updates
// ═══════════════════════════════════════════════════════════════════

mod calculations {
    use super::*;

    #[test]
    fn change_is_relative_to_previous_price() {
        let updates = vec![
            make_update(1, 100.0),
            make_update(2, 110.0),
            make_update(3, 99.0),
        ];
        let points = FundService::new().normalize_calculations(&updates);
        let changes: Vec<f64> = points.iter().map(|p| p.change).collect();

        assert_eq!(changes[0], 0.0);
        assert!((changes[1] - 0.10).abs() < 1e-9);
        assert!((changes[2] + 0.10).abs() < 1e-9);
    }

    #[test]
    fn zero_previous_price_gives_zero_change() {
        let updates = vec![make_update(1, 0.0), make_update(2, 5.0), make_update(3, 10.0)];
        let points = FundService::new().normalize_calculations(&updates);
        assert_eq!(points[1].change, 0.0);
        assert!((points[2].change - 1.0).abs() < 1e-9);
        assert!(points.iter().all(|p| p.change.is_finite()));
    }

    #[test]
    fn non_finite_prices_never_leak_into_change() {
        assert_eq!(FundService::share_price_change(f64::NAN, 1.0), 0.0);
        assert_eq!(FundService::share_price_change(1.0, f64::INFINITY), 0.0);
        assert_eq!(FundService::share_price_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn quantities_are_formatted_and_numeric() {
        let points = FundService::new().normalize_calculations(&[make_update(7, 1.0)]);
        let p = &points[0];
        assert_eq!(p.timestamp, 7);
        assert_eq!(p.gav, "2.000000");
        assert_eq!(p.total_supply, "1.000000");
        assert!((p.gav_value - 2.0).abs() < 1e-12);
        assert!((p.total_supply_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn precision_is_configurable() {
        let points = FundService::with_precision(2).normalize_calculations(&[make_update(7, 1.0)]);
        assert_eq!(points[0].gav, "2.00");
    }

    #[test]
    fn input_order_is_preserved() {
        let updates = vec![make_update(3, 1.0), make_update(1, 2.0)];
        let points = FundService::new().normalize_calculations(&updates);
        assert_eq!(points[0].timestamp, 3);
        assert_eq!(points[1].timestamp, 1);
        assert!((points[1].change - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_updates() {
        assert!(FundService::new().normalize_calculations(&[]).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// FundService — holdings regrouping
// ═══════════════════════════════════════════════════════════════════

mod holdings {
    use super::*;

    #[test]
    fn groups_one_record_per_timestamp() {
        let log = vec![
            make_holding(1, "ETH", 5.0),
            make_holding(1, "DAI", 10.0),
            make_holding(2, "ETH", 6.0),
        ];
        let grouped = FundService::new().group_holdings(&log);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].timestamp, 1);
        assert_eq!(grouped[0].holding("ETH"), Some(5.0));
        assert_eq!(grouped[0].holding("DAI"), Some(10.0));
        assert_eq!(grouped[1].timestamp, 2);
        assert_eq!(grouped[1].holding("ETH"), Some(6.0));
        assert_eq!(grouped[1].holdings.len(), 1);
    }

    #[test]
    fn unsorted_input_still_groups_by_timestamp() {
        let log = vec![
            make_holding(2, "ETH", 6.0),
            make_holding(1, "ETH", 5.0),
            make_holding(2, "DAI", 11.0),
            make_holding(1, "DAI", 10.0),
        ];
        let grouped = FundService::new().group_holdings(&log);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].timestamp, 1);
        assert_eq!(grouped[0].holdings.len(), 2);
        assert_eq!(grouped[1].timestamp, 2);
        assert_eq!(grouped[1].holding("DAI"), Some(11.0));
    }

    #[test]
    fn later_entry_wins_for_same_symbol_and_timestamp() {
        let log = vec![make_holding(1, "ETH", 5.0), make_holding(1, "ETH", 7.0)];
        let grouped = FundService::new().group_holdings(&log);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].holding("ETH"), Some(7.0));
    }

    #[test]
    fn grouped_json_matches_chart_records() {
        let log = vec![
            make_holding(1, "ETH", 5.0),
            make_holding(1, "DAI", 10.0),
            make_holding(2, "ETH", 6.0),
        ];
        let grouped = FundService::new().group_holdings(&log);
        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "timestamp": 1, "ETH": 5.0, "DAI": 10.0 },
                { "timestamp": 2, "ETH": 6.0 }
            ])
        );
    }

    #[test]
    fn asset_symbols_merge_known_assets_and_log() {
        let assets = vec![
            AssetRef {
                id: "0xmln".into(),
                symbol: "MLN".into(),
            },
            AssetRef {
                id: "0xeth".into(),
                symbol: "ETH".into(),
            },
        ];
        let log = vec![make_holding(1, "DAI", 1.0), make_holding(2, "ETH", 1.0)];
        let symbols = FundService::new().asset_symbols(&assets, &log);
        assert_eq!(symbols, vec!["DAI", "ETH", "MLN"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FundService — views, charts, investment log
// ═══════════════════════════════════════════════════════════════════

mod views {
    use super::*;

    fn snapshot() -> FundSnapshot {
        FundSnapshot {
            fund: FundDetails {
                id: "0xfund".into(),
                name: "Melon Fund".into(),
                total_supply: TokenQuantity::shares(3 * ONE + ONE / 4),
                calculations_updates: vec![
                    make_update(DEC_31_2020, 100.0),
                    make_update(JAN_01_2021, 110.0),
                ],
                investment_log: vec![
                    make_investment("i2", JAN_01_2021, InvestmentAction::Redeem),
                    make_investment("i1", DEC_31_2020, InvestmentAction::Invest),
                ],
                holdings_log: vec![
                    make_holding(DEC_31_2020, "ETH", 5.0),
                    make_holding(DEC_31_2020, "DAI", 10.0),
                    make_holding(JAN_01_2021, "ETH", 6.0),
                ],
            },
            assets: vec![AssetRef {
                id: "0xeth".into(),
                symbol: "ETH".into(),
            }],
        }
    }

    #[test]
    fn summary_formats_share_count() {
        let view = FundService::new().fund_view(&snapshot());
        assert_eq!(view.summary.address, "0xfund");
        assert_eq!(view.summary.name, "Melon Fund");
        assert_eq!(view.summary.shares, "3.250000");
    }

    #[test]
    fn investment_log_is_chronological() {
        let view = FundService::new().fund_view(&snapshot());
        let ids: Vec<&str> = view.investment_log.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["i1", "i2"]);
        assert_eq!(
            view.investment_log[0].to_text(),
            "12/31/2020 - Invest - 0.500000 - 0xowner"
        );
    }

    #[test]
    fn builds_four_charts_in_order() {
        let view = FundService::new().fund_view(&snapshot());
        let titles: Vec<&str> = view.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                GAV_CHART_TITLE,
                SHARE_PRICE_CHART_TITLE,
                CHANGE_CHART_TITLE,
                HOLDINGS_CHART_TITLE
            ]
        );

        let gav = &view.charts[0];
        assert_eq!(gav.series.len(), 2);
        assert_eq!(gav.series[0].name, "gav");
        assert_eq!(gav.series[1].name, "totalSupply");
        assert_eq!(gav.series[0].points.len(), 2);

        let change = &view.charts[2];
        assert_eq!(change.series[0].points[0], (DEC_31_2020, 0.0));
        assert!((change.series[0].points[1].1 - 0.1).abs() < 1e-9);
    }

    #[test]
    fn holdings_chart_has_one_series_per_symbol() {
        let view = FundService::new().fund_view(&snapshot());
        assert_eq!(view.asset_symbols, vec!["DAI", "ETH"]);

        let holdings = &view.charts[3];
        let dai = holdings.series.iter().find(|s| s.name == "DAI").unwrap();
        let eth = holdings.series.iter().find(|s| s.name == "ETH").unwrap();
        assert_eq!(dai.points, vec![(DEC_31_2020, 10.0)]);
        assert_eq!(eth.points, vec![(DEC_31_2020, 5.0), (JAN_01_2021, 6.0)]);
    }

    #[test]
    fn empty_fund_yields_empty_charts() {
        let mut snap = snapshot();
        snap.fund.calculations_updates.clear();
        snap.fund.holdings_log.clear();
        snap.fund.investment_log.clear();
        snap.assets.clear();

        let view = FundService::new().fund_view(&snap);
        assert_eq!(view.charts.len(), 4);
        assert!(view.charts.iter().all(|c| c.is_empty()));
        assert!(view.investment_log.is_empty());
    }

    #[test]
    fn manager_view_lists_funds_with_links() {
        let manager = make_manager("0xmgr", DEC_31_2020, 2);
        let view = FundService::new().manager_view(&manager);
        assert_eq!(view.address, "0xmgr");
        assert_eq!(view.active_since, "12/31/2020");
        assert_eq!(view.funds.len(), 2);
        assert_eq!(view.funds[0].shares, "1.000000");
        assert_eq!(view.funds[0].detail_url, "/fund?address=0xmgr-f0");
    }
}
