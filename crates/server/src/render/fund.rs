use std::fmt::Write;

use fund_dashboard_core::{
    models::view::{FundView, Resource},
    services::format::{format_date, format_percent},
};

use super::{chart::render_line_chart, escape, layout, resource};

fn summary(view: &FundView) -> String {
    format!(
        "<dl class=\"summary\"><dt>Name</dt><dd>{}</dd><dt>Address</dt><dd>{}</dd>\
         <dt>Shares</dt><dd>{}</dd></dl>",
        escape(&view.summary.name),
        escape(&view.summary.address),
        escape(&view.summary.shares)
    )
}

fn calculations_table(view: &FundView) -> String {
    if view.calculations.is_empty() {
        return "<p class=\"muted\">No calculation updates yet.</p>".to_string();
    }
    let mut out = String::from(
        "<table class=\"calculations\"><thead><tr><th>Date</th><th>GAV</th><th># Shares</th>\
         <th>Share price</th><th>Change</th></tr></thead><tbody>\n",
    );
    for point in &view.calculations {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            format_date(point.timestamp),
            escape(&point.gav),
            escape(&point.total_supply),
            point.gross_share_price,
            format_percent(point.change)
        );
    }
    out.push_str("</tbody></table>");
    out
}

fn holdings_table(view: &FundView) -> String {
    if view.holdings.is_empty() {
        return "<p class=\"muted\">No holdings recorded yet.</p>".to_string();
    }
    let header: String = view
        .asset_symbols
        .iter()
        .map(|symbol| format!("<th>{}</th>", escape(symbol)))
        .collect();
    let mut out = format!(
        "<table class=\"holdings\"><thead><tr><th>Date</th>{header}</tr></thead><tbody>\n"
    );
    for point in &view.holdings {
        let cells: String = view
            .asset_symbols
            .iter()
            .map(|symbol| match point.holding(symbol) {
                Some(amount) => format!("<td>{amount}</td>"),
                None => "<td></td>".to_string(),
            })
            .collect();
        let _ = writeln!(
            out,
            "<tr><td>{}</td>{cells}</tr>",
            format_date(point.timestamp)
        );
    }
    out.push_str("</tbody></table>");
    out
}

fn investment_log(view: &FundView) -> String {
    if view.investment_log.is_empty() {
        return "<p class=\"muted\">No investments yet.</p>".to_string();
    }
    let items: String = view
        .investment_log
        .iter()
        .map(|line| format!("<li>{}</li>\n", escape(&line.to_text())))
        .collect();
    format!("<ol class=\"investment-log\">\n{items}</ol>")
}

fn details(view: &FundView) -> String {
    let charts: String = view.charts.iter().map(render_line_chart).collect();
    format!(
        "{}\n<section class=\"charts\">{charts}</section>\n\
         <h2>Calculations</h2>\n{}\n<h2>Holdings</h2>\n{}\n<h2>Investment log</h2>\n{}",
        summary(view),
        calculations_table(view),
        holdings_table(view),
        investment_log(view)
    )
}

/// Fund detail page for `address`.
pub fn fund_page(address: &str, view: &Resource<FundView>) -> String {
    let heading = view
        .ready()
        .map(|v| v.summary.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(address);
    let body = format!(
        "<h1>Fund {}</h1>\n{}",
        escape(heading),
        resource(view, details)
    );
    layout(&format!("Fund {heading}"), &body)
}
