//! Lookup table WASM bindings.
//!
//! This module provides JavaScript bindings for the LUT fast path: build a
//! 256-entry table from a tone curve or from exposure/contrast, then apply
//! one table per channel without running the full pipeline.

use crate::types::{to_js_error, JsBitmap};
use lumen_core::{apply_luts as core_apply, CurvePoint, Lut, ToneCurve};
use wasm_bindgen::prelude::*;

/// JavaScript-accessible lookup table.
///
/// # Example (TypeScript)
/// ```typescript
/// // Points are in byte units (0 to 255)
/// const lut = JsLut.from_curve([
///   { x: 0, y: 0 },
///   { x: 64, y: 40 },
///   { x: 192, y: 215 },
///   { x: 255, y: 255 },
/// ]);
/// const result = apply_luts(image, lut, lut, lut);
/// ```
#[wasm_bindgen]
pub struct JsLut {
    inner: Lut,
}

/// Helper struct for deserializing JS curve points via serde.
#[derive(serde::Deserialize)]
struct CurvePointJs {
    x: f32,
    y: f32,
}

#[wasm_bindgen]
impl JsLut {
    /// Create an identity (no-op) LUT.
    pub fn identity() -> JsLut {
        JsLut {
            inner: Lut::identity(),
        }
    }

    /// Wrap a raw 256-byte table.
    ///
    /// # Errors
    /// Returns error if `table` is not exactly 256 bytes
    pub fn from_table(table: Vec<u8>) -> Result<JsLut, JsValue> {
        let table: [u8; 256] = table.try_into().map_err(|t: Vec<u8>| {
            JsValue::from_str(&format!("LUT table must have 256 entries, got {}", t.len()))
        })?;
        Ok(JsLut {
            inner: Lut::from_table(table),
        })
    }

    /// Create a LUT from curve control points.
    ///
    /// # Arguments
    /// * `points` - Array of {x: number, y: number} objects, byte units, sorted by x
    ///
    /// # Errors
    /// Returns error if points cannot be deserialized or do not form a valid curve
    pub fn from_curve(points: JsValue) -> Result<JsLut, JsValue> {
        let points: Vec<CurvePointJs> = serde_wasm_bindgen::from_value(points)
            .map_err(|e| JsValue::from_str(&format!("Invalid curve points: {}", e)))?;
        let points = points
            .into_iter()
            .map(|p| CurvePoint::new(p.x, p.y))
            .collect();
        Self::from_points(points)
    }

    /// Create a LUT for exposure (stops) followed by contrast (-100 to 100).
    pub fn exposure_contrast(exposure: f32, contrast: f32) -> JsLut {
        JsLut {
            inner: Lut::exposure_contrast(exposure, contrast),
        }
    }

    /// Check if this LUT produces no change (is identity).
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Get raw LUT data (256 bytes) for debugging/visualization.
    pub fn get_lut(&self) -> Vec<u8> {
        self.inner.as_table().to_vec()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsLut {
    fn from_points(points: Vec<CurvePoint>) -> Result<JsLut, JsValue> {
        let curve = ToneCurve::from_points(points).map_err(to_js_error)?;
        let inner = curve.build_lut().map_err(to_js_error)?;
        Ok(JsLut { inner })
    }
}

/// Apply one LUT per channel, returning a new bitmap. Alpha is copied.
#[wasm_bindgen]
pub fn apply_luts(bitmap: &JsBitmap, red: &JsLut, green: &JsLut, blue: &JsLut) -> JsBitmap {
    JsBitmap::from_core(core_apply(
        bitmap.as_core(),
        &red.inner,
        &green.inner,
        &blue.inner,
    ))
}
