//! UI Components
//!
//! Leptos components for the trend chart.

pub mod chart;

pub use chart::TrendChart;
