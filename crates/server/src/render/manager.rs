use fund_dashboard_core::models::view::{ManagerView, Resource};

use super::{escape, layout, resource};

fn details(view: &ManagerView) -> String {
    let rows: String = view
        .funds
        .iter()
        .map(|fund| {
            let href = escape(&fund.detail_url);
            format!(
                "<tr class=\"fund-row\" data-href=\"{href}\" onclick=\"location.href=this.dataset.href\">\
                 <td><a href=\"{href}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                escape(&fund.address),
                escape(&fund.name),
                escape(&fund.shares)
            )
        })
        .collect();

    let funds = if view.funds.is_empty() {
        "<p class=\"muted\">This manager has not set up any funds.</p>".to_string()
    } else {
        format!(
            "<table class=\"funds\"><thead><tr><th>Address</th><th>Name</th><th>Shares</th></tr></thead>\
             <tbody>\n{rows}</tbody></table>"
        )
    };

    format!(
        "<p>Active since {}</p>\n<h2>Funds</h2>\n{funds}",
        escape(&view.active_since)
    )
}

/// Manager detail page for `address`.
pub fn manager_page(address: &str, view: &Resource<ManagerView>) -> String {
    let body = format!(
        "<h1>Fund manager {}</h1>\n{}",
        escape(address),
        resource(view, details)
    );
    layout(&format!("Fund manager {address}"), &body)
}
