use fund_dashboard_core::models::{
    table::{ManagerPage, SortColumn, SortDirection, SortSpec},
    view::Resource,
};

use super::{escape, layout, resource};

const COLUMNS: [(SortColumn, &str); 3] = [
    (SortColumn::Address, "Address"),
    (SortColumn::ActiveSince, "Active since"),
    (SortColumn::Funds, "# Funds"),
];

/// Listing URL for a sort and page.
pub fn listing_url(sort: SortSpec, page: usize) -> String {
    format!("/?sort={}&dir={}&page={page}", sort.column, sort.direction)
}

/// Sort applied when a column header is clicked: the active column flips
/// direction, any other column starts ascending.
pub fn header_sort(current: SortSpec, column: SortColumn) -> SortSpec {
    if current.column == column {
        SortSpec::new(column, current.direction.reversed())
    } else {
        SortSpec::new(column, SortDirection::Asc)
    }
}

fn header(current: SortSpec) -> String {
    let cells: String = COLUMNS
        .iter()
        .map(|&(column, label)| {
            let marker = match (current.column == column, current.direction) {
                (true, SortDirection::Asc) => " ▲",
                (true, SortDirection::Desc) => " ▼",
                (false, _) => "",
            };
            format!(
                "<th><a href=\"{}\">{label}{marker}</a></th>",
                escape(&listing_url(header_sort(current, column), 0))
            )
        })
        .collect();
    format!("<thead><tr>{cells}</tr></thead>")
}

fn table(page: &ManagerPage) -> String {
    let rows: String = page
        .rows
        .iter()
        .map(|row| {
            let href = escape(&row.detail_url);
            format!(
                "<tr class=\"manager-row\" data-href=\"{href}\" onclick=\"location.href=this.dataset.href\">\
                 <td><a href=\"{href}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.address),
                escape(&row.active_since),
                row.fund_count
            )
        })
        .collect();

    let empty = if page.rows.is_empty() {
        "<p class=\"muted\">No fund managers found.</p>"
    } else {
        ""
    };

    format!(
        "<table class=\"managers\">{}<tbody>\n{rows}</tbody></table>{empty}{}",
        header(page.sort),
        pagination(page)
    )
}

fn pagination(page: &ManagerPage) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }
    let previous = if page.has_previous() {
        // Past the end, step back to the last real page.
        let target = page.page.min(page.total_pages) - 1;
        format!(
            "<a rel=\"prev\" href=\"{}\">Previous</a>",
            escape(&listing_url(page.sort, target))
        )
    } else {
        String::new()
    };
    let next = if page.has_next() {
        format!(
            "<a rel=\"next\" href=\"{}\">Next</a>",
            escape(&listing_url(page.sort, page.page.saturating_add(1)))
        )
    } else {
        String::new()
    };
    format!(
        "<nav class=\"pagination\">{previous}<span>Page {} of {} ({} managers)</span>{next}</nav>",
        page.page.saturating_add(1),
        page.total_pages,
        page.total_rows
    )
}

/// Full manager listing page.
pub fn listing_page(listing: &Resource<ManagerPage>, sort: SortSpec) -> String {
    let content = resource(listing, table);
    let body = format!("<h1>Fund managers</h1>\n{content}");
    // A failed load still shows which sort was requested in the title.
    layout(&format!("Fund managers ({} {})", sort.column, sort.direction), &body)
}
