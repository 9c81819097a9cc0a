//! Trend Chart Component
//!
//! Interactive canvas chart with hover tooltip, click inspection, a legend,
//! and the timeframe / zoom / export controls.

use leptos::*;
use web_sys::MouseEvent;

use crate::export::export_chart_png;
use crate::render::{
    draw_chart, PlotGeometry, CANVAS_HEIGHT, CANVAS_WIDTH, POINT_HIT_RADIUS, SERIES_COLOR,
    SERIES_NAME,
};
use crate::state::global::{DataPoint, GlobalState};
use crate::state::timeframe::Timeframe;

/// Interactive trend chart with its control buttons
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = state.chart_canvas;
    let visible = state.visible_data;

    let (hovered, set_hovered) = create_signal(None::<usize>);

    // Redraw whenever the visible dataset or the hover highlight changes
    create_effect(move |_| {
        let points = visible.get();
        let highlight = hovered.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points, highlight);
        }
    });

    let on_mousemove = move |ev: MouseEvent| {
        set_hovered.set(hit_index(canvas_ref, &visible.get(), &ev));
    };

    let on_mouseleave = move |_| set_hovered.set(None);

    let on_click = move |ev: MouseEvent| {
        let points = visible.get();
        if let Some(point) = hit_index(canvas_ref, &points, &ev).and_then(|i| points.get(i)) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!(
                    "You clicked on data point at timestamp: {} with value: {}",
                    point.timestamp, point.value
                ));
            }
        }
    };

    let state_for_zoom_in = state.clone();
    let state_for_zoom_out = state;

    let on_export = move |_| {
        if let Err(e) = export_chart_png(canvas_ref.get().as_deref()) {
            web_sys::console::error_1(&format!("Failed to export chart: {}", e).into());
        }
    };

    view! {
        <div class="chart-container">
            <div class="button-group">
                <TimeframeButton label="Daily" class="daily button" timeframe=Timeframe::Daily />
                <TimeframeButton label="Weekly" class="week button" timeframe=Timeframe::Weekly />
                <TimeframeButton label="Monthly" class="month button" timeframe=Timeframe::Monthly />
            </div>

            <div class="button-group">
                <button class="week button" on:click=move |_| state_for_zoom_in.zoom_in()>
                    "Zoom In"
                </button>
                <button class="week button" on:click=move |_| state_for_zoom_out.zoom_out()>
                    "Zoom Out"
                </button>
                <button class="png button" on:click=on_export>
                    "Export as PNG"
                </button>
            </div>

            <div class="chart-area">
                <canvas
                    node_ref=canvas_ref
                    width="800"
                    height="400"
                    on:mousemove=on_mousemove
                    on:mouseleave=on_mouseleave
                    on:click=on_click
                />
                <ChartTooltip hovered=hovered />
            </div>

            <ChartLegend />
        </div>
    }
}

/// Tooltip pinned to the hovered point, showing its timestamp and value
#[component]
fn ChartTooltip(hovered: ReadSignal<Option<usize>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let visible = state.visible_data;

    view! {
        {move || {
            let points = visible.get();
            hovered
                .get()
                .and_then(|index| points.get(index).cloned().map(|point| (index, point)))
                .map(|(index, point)| {
                    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
                    let geometry = PlotGeometry::new(CANVAS_WIDTH, CANVAS_HEIGHT, &values);
                    // Percent offsets track the marker across responsive resizes
                    let left = geometry.x_at(index) / CANVAS_WIDTH * 100.0;
                    let top = geometry.y_at(point.value) / CANVAS_HEIGHT * 100.0;

                    view! {
                        <div
                            class="chart-tooltip"
                            style=format!("left: {:.2}%; top: {:.2}%;", left, top)
                        >
                            <div class="tooltip-label">{point.timestamp.clone()}</div>
                            <div class="tooltip-value">
                                {format!("{}: {}", SERIES_NAME, point.value)}
                            </div>
                        </div>
                    }
                })
        }}
    }
}

/// Legend naming the plotted series
#[component]
fn ChartLegend() -> impl IntoView {
    view! {
        <div class="chart-legend">
            <span
                class="legend-swatch"
                style=format!("background-color: {}", SERIES_COLOR)
            ></span>
            <span class="legend-label">{SERIES_NAME}</span>
        </div>
    }
}

/// Timeframe selection button
#[component]
fn TimeframeButton(
    label: &'static str,
    class: &'static str,
    timeframe: Timeframe,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <button class=class on:click=move |_| state.set_timeframe(timeframe)>
            {label}
        </button>
    }
}

/// Map a mouse event to the marker under the cursor, if any.
///
/// The canvas is CSS-stretched, so cursor coordinates are scaled back into
/// backing-store pixels before hit testing.
fn hit_index(
    canvas_ref: NodeRef<html::Canvas>,
    points: &[DataPoint],
    ev: &MouseEvent,
) -> Option<usize> {
    let canvas = canvas_ref.get()?;
    let client_width = canvas.client_width() as f64;
    let client_height = canvas.client_height() as f64;
    if client_width <= 0.0 || client_height <= 0.0 {
        return None;
    }

    let px = ev.offset_x() as f64 * CANVAS_WIDTH / client_width;
    let py = ev.offset_y() as f64 * CANVAS_HEIGHT / client_height;

    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let geometry = PlotGeometry::new(CANVAS_WIDTH, CANVAS_HEIGHT, &values);
    geometry.hit_test(px, py, &values, POINT_HIT_RADIUS)
}
