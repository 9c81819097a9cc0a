//! HTTP API Client
//!
//! Fetches the chart dataset from the static JSON endpoint.

use gloo_net::http::Request;

use crate::state::global::DataPoint;

/// Endpoint serving the chart dataset
pub const DATA_URL: &str = "/data.json";

/// Fetch the raw dataset.
///
/// Issued once when the component mounts. Every failure mode — network
/// error, non-2xx status, malformed body — collapses into an `Err` string
/// for the caller to log; there is no retry.
pub async fn fetch_data() -> Result<Vec<DataPoint>, String> {
    let response = Request::get(DATA_URL)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Request failed with status {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
