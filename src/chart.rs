//! SVG charts for the reports.
//!
//! Three shapes are supported: grouped bars (one group per label, one bar per series), a pie
//! showing each label's share of the total, and lines with point markers. Each function returns
//! an `svg::Document`; `save` writes it to disk.

use crate::{fs, Result};
use anyhow::Context;
use std::path::Path;
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 60.0;
const FONT_SIZE: f64 = 14.0;

const COLORS: &[&str] = &[
    "steelblue",
    "orange",
    "seagreen",
    "crimson",
    "mediumpurple",
    "sienna",
    "orchid",
    "gray",
];

/// A named list of values, one per label of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Grouped bars, one group per label.
pub fn bar_chart(title: &str, labels: &[String], series: &[Series]) -> Document {
    let max = max_value(series);
    if labels.is_empty() || max <= 0.0 {
        return no_data(title);
    }

    let mut document = frame(title);
    document = axes(document, max);

    let plot_width = WIDTH - 2.0 * MARGIN;
    let group_width = plot_width / labels.len() as f64;
    let bar_width = group_width * 0.8 / series.len().max(1) as f64;

    for (ix, label) in labels.iter().enumerate() {
        let group_x = MARGIN + ix as f64 * group_width + group_width * 0.1;
        for (sx, s) in series.iter().enumerate() {
            let value = s.values().get(ix).copied().unwrap_or_default().max(0.0);
            let height = scale_y(value, max);
            let bar = Rectangle::new()
                .set("x", group_x + sx as f64 * bar_width)
                .set("y", HEIGHT - MARGIN - height)
                .set("width", bar_width)
                .set("height", height)
                .set("fill", color(sx));
            document = document.add(bar);
        }
        document = document.add(label_text(
            group_x + group_width * 0.4,
            HEIGHT - MARGIN + FONT_SIZE * 1.5,
            "middle",
            label,
        ));
    }
    legend(document, series.iter().map(|s| s.name()))
}

/// Lines with point markers. Each series shares the same x labels.
pub fn line_chart(title: &str, labels: &[String], series: &[Series]) -> Document {
    let max = max_value(series);
    if labels.is_empty() || max <= 0.0 {
        return no_data(title);
    }

    let mut document = frame(title);
    document = axes(document, max);

    let plot_width = WIDTH - 2.0 * MARGIN;
    let step = if labels.len() > 1 {
        plot_width / (labels.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |ix: usize| MARGIN + ix as f64 * step;

    for (sx, s) in series.iter().enumerate() {
        let points: Vec<(f64, f64)> = s
            .values
            .iter()
            .take(labels.len())
            .enumerate()
            .map(|(ix, v)| (x_at(ix), HEIGHT - MARGIN - scale_y(v.max(0.0), max)))
            .collect();
        let d = points
            .iter()
            .enumerate()
            .map(|(ix, (x, y))| {
                let op = if ix == 0 { "M" } else { "L" };
                format!("{op} {x:.2} {y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut path = SvgPath::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", color(sx))
            .set("stroke-width", 2.0);
        if sx > 0 {
            path = path.set("stroke-dasharray", "6 4");
        }
        document = document.add(path);
        for (x, y) in points {
            document = document.add(
                Circle::new()
                    .set("cx", x)
                    .set("cy", y)
                    .set("r", 4.0)
                    .set("fill", color(sx)),
            );
        }
    }
    for (ix, label) in labels.iter().enumerate() {
        document = document.add(label_text(
            x_at(ix),
            HEIGHT - MARGIN + FONT_SIZE * 1.5,
            "middle",
            label,
        ));
    }
    legend(document, series.iter().map(|s| s.name()))
}

/// Each label's share of the total, labelled with a percentage. Non-positive values are left
/// out.
pub fn pie_chart(title: &str, labels: &[String], values: &[f64]) -> Document {
    let slices: Vec<(&String, f64)> = labels
        .iter()
        .zip(values.iter().copied())
        .filter(|(_, v)| *v > 0.0)
        .collect();
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    if slices.is_empty() || total <= 0.0 {
        return no_data(title);
    }

    let mut document = frame(title);
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0 + FONT_SIZE;
    let r = HEIGHT / 2.0 - MARGIN;

    if slices.len() == 1 {
        document = document.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", r)
                .set("fill", color(0)),
        );
    }

    // Angles start at 12 o'clock and go clockwise
    let mut start = -std::f64::consts::FRAC_PI_2;
    for (ix, (label, value)) in slices.iter().enumerate() {
        let share = value / total;
        let sweep = share * std::f64::consts::TAU;
        let end = start + sweep;
        if slices.len() > 1 {
            let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };
            let d = format!(
                "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
            );
            document = document.add(
                SvgPath::new()
                    .set("d", d)
                    .set("fill", color(ix))
                    .set("stroke", "white"),
            );
        }
        let mid = start + sweep / 2.0;
        let (lx, ly) = (cx + r * 0.65 * mid.cos(), cy + r * 0.65 * mid.sin());
        document = document.add(label_text(lx, ly, "middle", &format_share(share)));
        document = document.add(label_text(
            cx + (r + FONT_SIZE) * mid.cos(),
            cy + (r + FONT_SIZE) * mid.sin(),
            if mid.cos() >= 0.0 { "start" } else { "end" },
            label,
        ));
        start = end;
    }
    document
}

/// Writes `document` to `path`, creating the parent directory.
pub fn save(path: impl AsRef<Path>, document: &Document) -> Result<()> {
    let path = path.as_ref();
    fs::create_parent(path)?;
    svg::save(path, document).context(format!("Unable to write chart {}", path.display()))
}

/// A share of 1.0 as a percentage with one decimal, e.g. `46.4%`.
fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn color(ix: usize) -> &'static str {
    COLORS[ix % COLORS.len()]
}

fn max_value(series: &[Series]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values().iter().copied())
        .fold(0.0, f64::max)
}

fn scale_y(value: f64, max: f64) -> f64 {
    value / (max * 1.1) * (HEIGHT - 2.0 * MARGIN)
}

fn frame(title: &str) -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE)
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", "white"),
        )
        .add(
            label_text(WIDTH / 2.0, MARGIN / 2.0, "middle", title)
                .set("font-size", FONT_SIZE * 1.3)
                .set("font-weight", "bold"),
        )
}

fn no_data(title: &str) -> Document {
    frame(title).add(label_text(WIDTH / 2.0, HEIGHT / 2.0, "middle", "No data"))
}

fn axes(document: Document, max: f64) -> Document {
    let bottom = HEIGHT - MARGIN;
    let x_axis = Line::new()
        .set("x1", MARGIN)
        .set("x2", WIDTH - MARGIN)
        .set("y1", bottom)
        .set("y2", bottom)
        .set("stroke", "black");
    let y_axis = Line::new()
        .set("x1", MARGIN)
        .set("x2", MARGIN)
        .set("y1", MARGIN)
        .set("y2", bottom)
        .set("stroke", "black");
    let mut document = document.add(x_axis).add(y_axis);
    for tick in 0..=4 {
        let value = max * tick as f64 / 4.0;
        let y = bottom - scale_y(value, max);
        document = document.add(label_text(MARGIN - 6.0, y + 4.0, "end", &format!("{value:.0}")));
    }
    document
}

fn legend<'a>(mut document: Document, names: impl Iterator<Item = &'a str>) -> Document {
    for (ix, name) in names.enumerate() {
        let y = MARGIN + ix as f64 * (FONT_SIZE + 6.0);
        document = document
            .add(
                Rectangle::new()
                    .set("x", WIDTH - MARGIN - 120.0)
                    .set("y", y - FONT_SIZE + 2.0)
                    .set("width", 12.0)
                    .set("height", 12.0)
                    .set("fill", color(ix)),
            )
            .add(label_text(WIDTH - MARGIN - 102.0, y, "start", name));
    }
    document
}

fn label_text(x: f64, y: f64, anchor: &str, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .add(TextNode::new(content))
}
