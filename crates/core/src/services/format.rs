use chrono::DateTime;

/// Date format used for table cells and chart axes.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Format a unix timestamp (seconds) as `MM/DD/YYYY` in UTC.
/// Out-of-range timestamps fall back to the raw number.
#[must_use]
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Detail page URL of a fund manager.
#[must_use]
pub fn manager_url(address: &str) -> String {
    format!("/manager?address={}", urlencoding::encode(address))
}

/// Detail page URL of a fund.
#[must_use]
pub fn fund_url(address: &str) -> String {
    format!("/fund?address={}", urlencoding::encode(address))
}

/// Format a fraction as a signed percentage, e.g. `0.1` → `+10.00%`.
#[must_use]
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "—".to_string();
    }
    format!("{:+.2}%", fraction * 100.0)
}
