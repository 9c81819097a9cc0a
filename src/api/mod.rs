//! HTTP API Client
//!
//! Functions for loading the chart dataset.

pub mod client;

pub use client::{fetch_data, DATA_URL};
