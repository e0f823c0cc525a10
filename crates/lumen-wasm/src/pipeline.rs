//! Full pipeline WASM bindings.
//!
//! The UI keeps its edit state as a plain JavaScript object mirroring
//! `AdjustmentSettings` (camelCase keys). Missing keys take neutral defaults,
//! so `{ basic: { exposure: 0.5 } }` is a valid settings object.

use crate::types::{to_js_error, JsBitmap};
use lumen_core::{process, AdjustmentSettings};
use wasm_bindgen::prelude::*;

/// Process a bitmap with a settings object.
///
/// # Arguments
/// * `bitmap` - Source bitmap (left unchanged)
/// * `settings` - Adjustment settings object (partial objects allowed)
/// * `seed` - Film grain seed; reuse it to keep grain stable between renders
///
/// # Errors
/// Returns error if the settings object cannot be deserialized or a curve
/// is malformed
///
/// # Example (TypeScript)
/// ```typescript
/// const preview = process_image(source, {
///   basic: { exposure: 0.5, contrast: 20 },
///   effects: { vignette: { amount: -30 } },
/// }, sessionSeed);
/// ```
#[wasm_bindgen]
pub fn process_image(bitmap: &JsBitmap, settings: JsValue, seed: u32) -> Result<JsBitmap, JsValue> {
    let settings = parse_settings(settings)?;
    process_with(bitmap, &settings, seed)
}

/// Return the neutral settings object, useful for resetting an edit.
#[wasm_bindgen]
pub fn default_settings() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&AdjustmentSettings::default())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize settings: {}", e)))
}

fn parse_settings(settings: JsValue) -> Result<AdjustmentSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(AdjustmentSettings::default());
    }
    serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))
}

pub(crate) fn process_with(
    bitmap: &JsBitmap,
    settings: &AdjustmentSettings,
    seed: u32,
) -> Result<JsBitmap, JsValue> {
    process(bitmap.as_core(), settings, seed)
        .map(JsBitmap::from_core)
        .map_err(to_js_error)
}
