//! Browser bindings (feature `wasm`)
//!
//! Lets a web form call the calculator directly. Errors come back as JS
//! exceptions carrying the error message.

use wasm_bindgen::prelude::*;

use crate::core::{compute_from_labels, OrientationRequest, OutputFormat};
use crate::formats::render_result;

/// Compute an orientation from form labels and return it as a JS object
/// `{cassette_notch, krios_notch, krios_stage_tilt}`.
#[wasm_bindgen(js_name = computeOrientation)]
pub fn compute_orientation(
    notch: &str,
    lamellae: &str,
    milling_angle: i32,
    shuttle: &str,
) -> Result<JsValue, JsValue> {
    let result = compute_from_labels(notch, lamellae, i64::from(milling_angle), shuttle)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same as `computeOrientation` but returns the rendered report text.
#[wasm_bindgen(js_name = renderOrientation)]
pub fn render_orientation(
    notch: &str,
    lamellae: &str,
    milling_angle: i32,
    shuttle: &str,
    format: &str,
) -> Result<String, JsValue> {
    let format = OutputFormat::parse(format).unwrap_or_default();
    let request = crate::core::LabelRequest {
        notch: notch.to_string(),
        lamellae: lamellae.to_string(),
        milling_angle: i64::from(milling_angle),
        shuttle: shuttle.to_string(),
    }
    .parse()
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(render(&request, format))
}

fn render(request: &OrientationRequest, format: OutputFormat) -> String {
    render_result(request, &request.compute(), format)
}
