//! Server-side HTML for the dashboard pages.
//!
//! Plain string building: every interpolated value goes through [`escape`].

use fund_dashboard_core::models::view::Resource;

pub mod chart;
pub mod fund;
pub mod listing;
pub mod manager;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;margin:1rem 0}\
th,td{padding:.35rem .75rem;border-bottom:1px solid #ddd;text-align:left}\
tr.manager-row:hover,tr.fund-row:hover{background:#f4f7fb;cursor:pointer}\
.error{color:#a40000}.muted{color:#777}\
.charts{display:flex;flex-wrap:wrap;gap:1rem}\
nav.pagination a{margin:0 .5rem}";

/// Escape text for use in HTML bodies and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><a href=\"/\">Fund managers</a></header>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Render a resource: a loading notice, an error block, or `ready(value)`.
pub fn resource<T>(state: &Resource<T>, ready: impl FnOnce(&T) -> String) -> String {
    match state {
        Resource::Loading => "<p class=\"loading muted\">Loading…</p>".to_string(),
        Resource::Failed(message) => format!(
            "<p class=\"error\" role=\"alert\">Could not load data: {}</p>",
            escape(message)
        ),
        Resource::Ready(value) => ready(value),
    }
}
