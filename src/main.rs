//! Trend Chart
//!
//! Interactive time-series chart built with Leptos (WASM).
//!
//! # Features
//!
//! - Timeframe filtering (daily / weekly / monthly)
//! - Zoom over a prefix of the filtered dataset
//! - Hover tooltip and click-to-inspect on data points
//! - PNG export via browser download
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The dataset is fetched once from a static JSON endpoint; all
//! filtering and zooming happens client-side over the in-memory copy.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod render;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
