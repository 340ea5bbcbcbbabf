use std::fmt::Write;

use fund_dashboard_core::{models::chart::LineChart, services::format::format_date};

use super::escape;

pub const WIDTH: f64 = 640.0;
pub const HEIGHT: f64 = 260.0;
const MARGIN: f64 = 48.0;

const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Maps data coordinates into the SVG viewport, y pointing up.
#[derive(Debug, Clone, Copy)]
struct Frame {
    t0: i64,
    t1: i64,
    lo: f64,
    hi: f64,
}

impl Frame {
    fn x(&self, t: i64) -> f64 {
        if self.t1 == self.t0 {
            return WIDTH / 2.0;
        }
        let span = (self.t1 - self.t0) as f64;
        MARGIN + (t - self.t0) as f64 / span * (WIDTH - 2.0 * MARGIN)
    }

    fn y(&self, value: f64) -> f64 {
        if self.hi == self.lo {
            return HEIGHT / 2.0;
        }
        HEIGHT - MARGIN - (value - self.lo) / (self.hi - self.lo) * (HEIGHT - 2.0 * MARGIN)
    }
}

fn format_value(value: f64) -> String {
    if value.abs() >= 10_000.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// Render a line chart as an inline SVG figure, one polyline per series.
pub fn render_line_chart(chart: &LineChart) -> String {
    let title = escape(&chart.title);
    let mut out = format!(
        "<figure class=\"chart\"><figcaption>{title}</figcaption>\
         <svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         width=\"{WIDTH}\" height=\"{HEIGHT}\" role=\"img\" aria-label=\"{title}\">\
         <rect x=\"{MARGIN}\" y=\"{MARGIN}\" width=\"{w}\" height=\"{h}\" fill=\"none\" stroke=\"#ccc\"/>",
        w = WIDTH - 2.0 * MARGIN,
        h = HEIGHT - 2.0 * MARGIN,
    );

    let bounds = chart.time_bounds().zip(chart.value_bounds());
    match bounds {
        Some(((t0, t1), (lo, hi))) => {
            let frame = Frame { t0, t1, lo, hi };
            for (i, series) in chart.series.iter().enumerate() {
                let points: Vec<String> = series
                    .points
                    .iter()
                    .filter(|(_, v)| v.is_finite())
                    .map(|&(t, v)| format!("{:.1},{:.1}", frame.x(t), frame.y(v)))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let _ = write!(
                    out,
                    "<polyline class=\"series\" data-series=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>",
                    escape(&series.name),
                    PALETTE[i % PALETTE.len()],
                    points.join(" ")
                );
            }

            let bottom = HEIGHT - MARGIN;
            let _ = write!(
                out,
                "<text class=\"x-label\" x=\"{MARGIN}\" y=\"{}\" font-size=\"11\">{}</text>\
                 <text class=\"x-label\" x=\"{}\" y=\"{}\" font-size=\"11\" text-anchor=\"end\">{}</text>\
                 <text class=\"y-label\" x=\"{}\" y=\"{bottom}\" font-size=\"11\" text-anchor=\"end\">{}</text>\
                 <text class=\"y-label\" x=\"{}\" y=\"{MARGIN}\" font-size=\"11\" text-anchor=\"end\">{}</text>",
                bottom + 16.0,
                format_date(t0),
                WIDTH - MARGIN,
                bottom + 16.0,
                format_date(t1),
                MARGIN - 4.0,
                format_value(lo),
                MARGIN - 4.0,
                format_value(hi),
            );
        }
        None => {
            let _ = write!(
                out,
                "<text class=\"empty\" x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"#777\">No data</text>",
                WIDTH / 2.0,
                HEIGHT / 2.0
            );
        }
    }
    out.push_str("</svg>");

    if chart.series.len() > 1 {
        out.push_str("<ul class=\"legend\">");
        for (i, series) in chart.series.iter().enumerate() {
            let _ = write!(
                out,
                "<li><span style=\"color:{}\">■</span> {}</li>",
                PALETTE[i % PALETTE.len()],
                escape(&series.name)
            );
        }
        out.push_str("</ul>");
    }
    out.push_str("</figure>");
    out
}
