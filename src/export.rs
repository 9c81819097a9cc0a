//! Chart Export
//!
//! Saves the rendered chart as a PNG through a browser download.

use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

const EXPORT_FILENAME: &str = "chart.png";

/// Encode the canvas as PNG and trigger a download of `chart.png`.
///
/// Passing `None` (chart not mounted yet) is a no-op. Failures surface as
/// an error string; the caller decides how to report them.
pub fn export_chart_png(canvas: Option<&HtmlCanvasElement>) -> Result<(), String> {
    let canvas = match canvas {
        Some(canvas) => canvas,
        None => return Ok(()),
    };

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|e| format!("Failed to encode canvas as PNG: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "Document not available".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create download link: {:?}", e))?;
    anchor
        .set_attribute("href", &data_url)
        .map_err(|e| format!("Failed to set download target: {:?}", e))?;
    anchor
        .set_attribute("download", EXPORT_FILENAME)
        .map_err(|e| format!("Failed to set download filename: {:?}", e))?;

    anchor
        .dyn_ref::<web_sys::HtmlElement>()
        .ok_or_else(|| "Download link is not an HTML element".to_string())?
        .click();

    Ok(())
}
