//! WASM bindings for in-browser export.
//!
//! The browser rasterizes charts on canvases and passes the PNGs as base64
//! strings keyed by `<section-id>-<index>`.

use std::collections::HashMap;

use futures::executor::block_on;
use wasm_bindgen::prelude::*;

use crate::export::DocxExporter;
use crate::model::ExportRequest;
use crate::raster::PrerenderedCharts;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Result of [`export_docx`].
#[wasm_bindgen(getter_with_clone)]
pub struct DocxFile {
    #[wasm_bindgen(js_name = fileName)]
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub warnings: Vec<String>,
}

/// Export a request to DOCX.
///
/// `request_json` is the serialized export request, `template` optional
/// `.docx` bytes, and `charts_json` an object mapping chart keys to base64
/// PNG data (plain or as a `data:` URL).
#[wasm_bindgen]
pub fn export_docx(
    request_json: &str,
    template: Option<Vec<u8>>,
    charts_json: &str,
) -> Result<DocxFile, JsValue> {
    let request: ExportRequest =
        serde_json::from_str(request_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let charts = decode_charts(charts_json)?;

    let output = block_on(DocxExporter::new().export(&request, template.as_deref(), &charts))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(DocxFile {
        file_name: output.file_name,
        bytes: output.bytes,
        warnings: output.warnings.iter().map(ToString::to_string).collect(),
    })
}

fn decode_charts(charts_json: &str) -> Result<PrerenderedCharts, JsValue> {
    let mut charts = PrerenderedCharts::new();
    if charts_json.trim().is_empty() {
        return Ok(charts);
    }
    let encoded: HashMap<String, String> =
        serde_json::from_str(charts_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    for (key, payload) in encoded {
        // A bad image only loses its own figure.
        if let Err(e) = charts.insert_base64(key.as_str(), &payload) {
            tracing::warn!(chart = %key, "ignoring chart payload: {e}");
        }
    }
    Ok(charts)
}
