//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::Utc;
use leptos::*;

use crate::state::timeframe::{self, visible_points, Timeframe};

/// A single data point from the fetched JSON array
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DataPoint {
    pub timestamp: String,
    pub value: f64,
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Raw dataset, set once from the fetch response
    pub raw_data: RwSignal<Vec<DataPoint>>,
    /// Currently selected timeframe filter
    pub timeframe: RwSignal<Timeframe>,
    /// Zoom divisor, always >= 1
    pub zoom: RwSignal<u32>,
    /// Derived dataset actually rendered
    pub visible_data: Memo<Vec<DataPoint>>,
    /// Canvas backing the rendered chart; unset until the chart mounts
    pub chart_canvas: NodeRef<html::Canvas>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let raw_data = create_rw_signal(Vec::new());
    let timeframe = create_rw_signal(Timeframe::default());
    let zoom = create_rw_signal(1u32);

    // `now` is captured once per recomputation; the whole filter pass sees a
    // single reference instant.
    let visible_data = create_memo(move |_| {
        visible_points(&raw_data.get(), timeframe.get(), zoom.get(), Utc::now())
    });

    provide_context(GlobalState {
        raw_data,
        timeframe,
        zoom,
        visible_data,
        chart_canvas: create_node_ref(),
    });
}

impl GlobalState {
    /// Select a timeframe unconditionally, even when it is already active.
    pub fn set_timeframe(&self, timeframe: Timeframe) {
        self.timeframe.set(timeframe);
    }

    /// Step the zoom factor down ("Zoom In"), clamped at 1.
    pub fn zoom_in(&self) {
        self.zoom.update(|z| *z = timeframe::zoom_in(*z));
    }

    /// Step the zoom factor up ("Zoom Out"); no upper bound.
    pub fn zoom_out(&self) {
        self.zoom.update(|z| *z = timeframe::zoom_out(*z));
    }
}
