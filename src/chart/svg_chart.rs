//! Implements the chart traits by drawing SVG files, one file per widget. Redrawing a widget
//! rewrites its file.

use crate::chart::{Chart, ChartFactory, ChartKind, ChartStyle, Legend, Series};
use crate::{fs, Result};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::Document;
use tracing::debug;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 20.0;
const FONT: &str = "sans-serif";

/// Creates `SvgChart` widgets inside `dir`.
#[derive(Debug, Clone)]
pub struct SvgCharts {
    dir: PathBuf,
}

impl SvgCharts {
    /// Charts will be written into `dir`, which is created if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The file that a chart of `kind` is drawn into.
    pub fn path(&self, kind: ChartKind) -> PathBuf {
        self.dir.join(match kind {
            ChartKind::Bar => "time-expense-chart.svg",
            ChartKind::Doughnut => "category-expense-chart.svg",
        })
    }
}

impl ChartFactory for SvgCharts {
    fn create(
        &mut self,
        kind: ChartKind,
        series: &Series,
        style: &ChartStyle,
    ) -> Result<Box<dyn Chart>> {
        let mut chart = SvgChart {
            path: self.path(kind),
            kind,
            style: style.clone(),
            series: Series::default(),
        };
        chart.update(series)?;
        Ok(Box::new(chart))
    }
}

struct SvgChart {
    path: PathBuf,
    kind: ChartKind,
    style: ChartStyle,
    series: Series,
}

impl Chart for SvgChart {
    fn update(&mut self, series: &Series) -> Result<()> {
        self.series.labels = series.labels.clone();
        self.series.values = series.values.clone();
        // A chart keeps its title when an update does not carry one
        if series.title.is_some() {
            self.series.title = series.title.clone();
        }
        let document = render(self.kind, &self.series, &self.style);
        write(&self.path, &document)
    }
}

fn write(path: &Path, document: &Document) -> Result<()> {
    debug!("Drawing chart to {}", path.display());
    fs::write(path, document.to_string())
}

fn render(kind: ChartKind, series: &Series, style: &ChartStyle) -> Document {
    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", "white"),
        );

    if style.show_title {
        if let Some(title) = &series.title {
            document = document
                .add(text(WIDTH / 2.0, MARGIN + 10.0, title, 18.0).set("text-anchor", "middle"));
        }
    }

    if series.values.iter().all(|v| *v <= 0.0) {
        return document.add(
            text(WIDTH / 2.0, HEIGHT / 2.0, "No expenses", 16.0)
                .set("text-anchor", "middle")
                .set("fill", "gray"),
        );
    }

    match kind {
        ChartKind::Bar => draw_bars(document, series, style),
        ChartKind::Doughnut => draw_doughnut(document, series, style),
    }
}

fn draw_bars(mut document: Document, series: &Series, style: &ChartStyle) -> Document {
    let (left, right, top, bottom) = (70.0, WIDTH - MARGIN, 80.0, HEIGHT - 50.0);
    let max = series.values.iter().cloned().fold(0.0, f64::max);
    let slot = (right - left) / series.values.len() as f64;
    let fill = color(style, 0);

    if style.legend == Legend::Top {
        document = document
            .add(swatch(WIDTH / 2.0 - 90.0, MARGIN + 25.0, &fill))
            .add(text(WIDTH / 2.0 - 70.0, MARGIN + 36.0, &style.dataset_label, 12.0));
    }
    if let Some(axis_title) = &style.axis_title {
        let (x, y) = (MARGIN, (top + bottom) / 2.0);
        document = document.add(
            text(x, y, axis_title, 12.0)
                .set("text-anchor", "middle")
                .set("transform", format!("rotate(-90 {x} {y})")),
        );
    }

    for (ix, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
        let height = (value / max).max(0.0) * (bottom - top);
        let x = left + slot * ix as f64 + slot * 0.1;
        let mut bar = Rectangle::new()
            .set("x", x)
            .set("y", bottom - height)
            .set("width", slot * 0.8)
            .set("height", height)
            .set("fill", fill.as_str());
        if let Some(border) = &style.border_color {
            bar = bar.set("stroke", border.as_str()).set("stroke-width", 1.0);
        }
        document = document.add(bar).add(
            text(x + slot * 0.4, bottom + 18.0, label, 11.0).set("text-anchor", "middle"),
        );
    }

    document
        .add(axis(left, top, left, bottom))
        .add(axis(left, bottom, right, bottom))
        .add(
            text(left - 8.0, top + 4.0, &format_num::format_num!(",.2f", max), 11.0)
                .set("text-anchor", "end"),
        )
        .add(text(left - 8.0, bottom, "0", 11.0).set("text-anchor", "end"))
}

fn draw_doughnut(mut document: Document, series: &Series, style: &ChartStyle) -> Document {
    let total: f64 = series.values.iter().filter(|v| **v > 0.0).sum();
    let (cx, cy) = (260.0, HEIGHT / 2.0 + 10.0);
    let (outer, inner) = (180.0, 90.0);

    let mut start = -PI / 2.0;
    for (ix, value) in series.values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let fill = color(style, ix);
        let sweep = value / total * 2.0 * PI;
        document = if sweep >= 2.0 * PI - 1e-9 {
            // A single slice is a full ring, which an arc cannot describe
            document
                .add(ring(cx, cy, outer).set("fill", fill))
                .add(ring(cx, cy, inner).set("fill", "white"))
        } else {
            document.add(
                SvgPath::new()
                    .set("d", slice(cx, cy, outer, inner, start, start + sweep))
                    .set("fill", fill)
                    .set("stroke", "white")
                    .set("stroke-width", 2.0),
            )
        };
        start += sweep;
    }

    if style.legend == Legend::Right {
        let x = 520.0;
        for (ix, label) in series.labels.iter().enumerate() {
            let y = 80.0 + ix as f64 * 24.0;
            document = document
                .add(swatch(x, y, &color(style, ix)))
                .add(text(x + 20.0, y + 11.0, label, 12.0));
        }
    }
    document
}

/// The path of a ring segment between angles `a0` and `a1` (radians, clockwise from +x).
fn slice(cx: f64, cy: f64, outer: f64, inner: f64, a0: f64, a1: f64) -> String {
    let large = if a1 - a0 > PI { 1 } else { 0 };
    let point = |r: f64, a: f64| (cx + r * a.cos(), cy + r * a.sin());
    let (ox0, oy0) = point(outer, a0);
    let (ox1, oy1) = point(outer, a1);
    let (ix1, iy1) = point(inner, a1);
    let (ix0, iy0) = point(inner, a0);
    format!(
        "M {ox0:.3} {oy0:.3} A {outer} {outer} 0 {large} 1 {ox1:.3} {oy1:.3} \
        L {ix1:.3} {iy1:.3} A {inner} {inner} 0 {large} 0 {ix0:.3} {iy0:.3} Z"
    )
}

fn color(style: &ChartStyle, ix: usize) -> String {
    match style.colors.len() {
        0 => "gray".to_string(),
        n => style.colors[ix % n].clone(),
    }
}

fn text(x: f64, y: f64, content: &str, size: f64) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT)
        .set("font-size", size)
        .add(svg::node::Text::new(escape(content)))
}

/// Escapes markup characters. Text nodes are written verbatim.
fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn swatch(x: f64, y: f64, fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", 14.0)
        .set("height", 14.0)
        .set("fill", fill)
}

fn ring(cx: f64, cy: f64, r: f64) -> Circle {
    Circle::new().set("cx", cx).set("cy", cy).set("r", r)
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", 1.0)
}
