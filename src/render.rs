//! Chart Rendering
//!
//! Plot geometry and HTML5 Canvas painting for the trend chart. The
//! geometry is pure; only [`draw_chart`] touches the DOM.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::DataPoint;
use crate::state::timeframe::parse_timestamp;

/// Canvas backing width, in pixels. CSS stretches the element responsively.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Canvas backing height, in pixels. Fixed at 400 by the container.
pub const CANVAS_HEIGHT: f64 = 400.0;

/// Name of the single rendered series, shown by the legend and tooltip
pub const SERIES_NAME: &str = "value";

/// Hit radius for hover/click tests on point markers, in canvas pixels
pub const POINT_HIT_RADIUS: f64 = 16.0;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

const GRID_ROWS: usize = 5;
const MAX_X_LABELS: usize = 6;

/// Stroke and marker color of the plotted line, shared with the legend
pub const SERIES_COLOR: &str = "#8884d8";

const BACKGROUND_COLOR: &str = "#1f2937";
const GRID_COLOR: &str = "#374151";
const LABEL_COLOR: &str = "#9ca3af";
const MUTED_COLOR: &str = "#6b7280";

/// Maps point indices and values to canvas pixels.
///
/// Points are spaced evenly along X in dataset order (category axis); the
/// Y range is the padded min/max of the plotted values.
#[derive(Clone, Copy, Debug)]
pub struct PlotGeometry {
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
    count: usize,
}

impl PlotGeometry {
    /// Build the geometry for `values` on a `width` x `height` canvas.
    ///
    /// The Y range gets 10% padding on each side; a flat or empty series is
    /// widened so the span never degenerates.
    pub fn new(width: f64, height: f64, values: &[f64]) -> Self {
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for v in values {
            y_min = y_min.min(*v);
            y_max = y_max.max(*v);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }

        let span = y_max - y_min;
        let padding = if span > 0.0 { span * 0.1 } else { 1.0 };

        Self {
            width,
            height,
            y_min: y_min - padding,
            y_max: y_max + padding,
            count: values.len(),
        }
    }

    pub fn plot_left(&self) -> f64 {
        MARGIN_LEFT
    }

    pub fn plot_right(&self) -> f64 {
        self.width - MARGIN_RIGHT
    }

    pub fn plot_top(&self) -> f64 {
        MARGIN_TOP
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - MARGIN_BOTTOM
    }

    fn plot_width(&self) -> f64 {
        self.plot_right() - self.plot_left()
    }

    fn plot_height(&self) -> f64 {
        self.plot_bottom() - self.plot_top()
    }

    /// X pixel of the point at `index`. A single point sits centered.
    pub fn x_at(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.plot_left() + self.plot_width() / 2.0;
        }
        self.plot_left() + index as f64 / (self.count - 1) as f64 * self.plot_width()
    }

    /// Y pixel of `value`. Canvas Y grows downward.
    pub fn y_at(&self, value: f64) -> f64 {
        self.plot_top() + (self.y_max - value) / (self.y_max - self.y_min) * self.plot_height()
    }

    /// Y pixel of gridline `row` out of `rows` horizontal segments.
    pub fn grid_y(&self, row: usize, rows: usize) -> f64 {
        self.plot_top() + row as f64 / rows as f64 * self.plot_height()
    }

    /// Axis value labeled at gridline `row` out of `rows` segments.
    pub fn grid_value(&self, row: usize, rows: usize) -> f64 {
        self.y_max - row as f64 / rows as f64 * (self.y_max - self.y_min)
    }

    /// Point indices to label on the X axis: at most `max_labels`, always
    /// covering the first and last point when any exist.
    pub fn tick_indices(&self, max_labels: usize) -> Vec<usize> {
        if self.count == 0 || max_labels == 0 {
            return Vec::new();
        }
        if self.count <= max_labels {
            return (0..self.count).collect();
        }
        if max_labels == 1 {
            return vec![0];
        }

        let last = (self.count - 1) as f64;
        let slots = (max_labels - 1) as f64;
        let mut ticks: Vec<usize> = (0..max_labels)
            .map(|k| (k as f64 * last / slots).round() as usize)
            .collect();
        ticks.dedup();
        ticks
    }

    /// Nearest marker within `radius` pixels of the cursor, if any.
    ///
    /// `values` must be the same slice the geometry was built from.
    pub fn hit_test(&self, px: f64, py: f64, values: &[f64], radius: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, value) in values.iter().enumerate() {
            let dx = self.x_at(index) - px;
            let dy = self.y_at(*value) - py;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance <= radius && best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Format a timestamp for the X axis ("Jan 05" style), falling back to the
/// raw string when it does not parse.
pub fn tick_label(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(instant) => instant.format("%b %d").to_string(),
        None => timestamp.to_string(),
    }
}

/// Draw the chart onto the canvas: background, grid, axis labels, the line
/// series with point markers, and the hover highlight.
pub fn draw_chart(canvas: &HtmlCanvasElement, points: &[DataPoint], hovered: Option<usize>) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let geometry = PlotGeometry::new(width, height, &values);

    // Background
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    draw_grid(&ctx, &geometry);

    if points.is_empty() {
        ctx.set_fill_style_str(MUTED_COLOR);
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No data points", width / 2.0, height / 2.0);
        return;
    }

    draw_series(&ctx, &geometry, points, &values, hovered);
    draw_x_labels(&ctx, &geometry, points);
}

/// Gridlines plus Y-axis value labels
fn draw_grid(ctx: &CanvasRenderingContext2d, geometry: &PlotGeometry) {
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);

    // Horizontal rows with value labels on the left
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    for row in 0..=GRID_ROWS {
        let y = geometry.grid_y(row, GRID_ROWS);
        ctx.begin_path();
        ctx.move_to(geometry.plot_left(), y);
        ctx.line_to(geometry.plot_right(), y);
        ctx.stroke();

        let label = format!("{:.1}", geometry.grid_value(row, GRID_ROWS));
        let _ = ctx.fill_text(&label, 5.0, y + 4.0);
    }

    // Vertical lines at the labeled X positions
    for index in geometry.tick_indices(MAX_X_LABELS) {
        let x = geometry.x_at(index);
        ctx.begin_path();
        ctx.move_to(x, geometry.plot_top());
        ctx.line_to(x, geometry.plot_bottom());
        ctx.stroke();
    }
}

/// Line, point markers, and the enlarged hover marker
fn draw_series(
    ctx: &CanvasRenderingContext2d,
    geometry: &PlotGeometry,
    points: &[DataPoint],
    values: &[f64],
    hovered: Option<usize>,
) {
    ctx.set_stroke_style_str(SERIES_COLOR);
    ctx.set_line_width(2.0);

    if points.len() > 1 {
        ctx.begin_path();
        for (index, value) in values.iter().enumerate() {
            let x = geometry.x_at(index);
            let y = geometry.y_at(*value);
            if index == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
    }

    ctx.set_fill_style_str(SERIES_COLOR);
    for (index, value) in values.iter().enumerate() {
        let radius = if hovered == Some(index) { 8.0 } else { 3.0 };
        ctx.begin_path();
        let _ = ctx.arc(
            geometry.x_at(index),
            geometry.y_at(*value),
            radius,
            0.0,
            std::f64::consts::PI * 2.0,
        );
        ctx.fill();
    }
}

/// Formatted date labels under the labeled X positions
fn draw_x_labels(ctx: &CanvasRenderingContext2d, geometry: &PlotGeometry, points: &[DataPoint]) {
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");

    for index in geometry.tick_indices(MAX_X_LABELS) {
        let label = tick_label(&points[index].timestamp);
        let _ = ctx.fill_text(&label, geometry.x_at(index), geometry.plot_bottom() + 20.0);
    }
}
