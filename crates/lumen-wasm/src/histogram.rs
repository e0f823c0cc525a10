//! Histogram computation WASM bindings.
//!
//! This module provides JavaScript bindings for histogram computation,
//! allowing RGB and luminance histograms to be calculated from a bitmap.

use crate::types::{to_js_error, JsBitmap};
use lumen_core::histogram::{
    compute_histogram as compute_histogram_core, compute_histogram_with_bins, Histogram,
};
use wasm_bindgen::prelude::*;

/// Histogram result accessible from JavaScript.
///
/// Contains histograms for red, green, blue, and luminance channels,
/// plus helper methods for clipping detection and normalization.
#[wasm_bindgen]
pub struct JsHistogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    luminance: Vec<u32>,
    max_value: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel histogram.
    pub fn red(&self) -> Vec<u32> {
        self.red.clone()
    }

    /// Get green channel histogram.
    pub fn green(&self) -> Vec<u32> {
        self.green.clone()
    }

    /// Get blue channel histogram.
    pub fn blue(&self) -> Vec<u32> {
        self.blue.clone()
    }

    /// Get luminance histogram.
    pub fn luminance(&self) -> Vec<u32> {
        self.luminance.clone()
    }

    /// Get maximum bin value across all RGB channels.
    ///
    /// Useful for normalizing histogram display.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Check if any RGB channel has counts in the top bin (highlight clipping).
    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    /// Check if any RGB channel has counts in the bottom bin (shadow clipping).
    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }
}

impl From<Histogram> for JsHistogram {
    fn from(hist: Histogram) -> Self {
        let max_value = hist.max_value();
        let has_highlight_clipping = hist.has_highlight_clipping();
        let has_shadow_clipping = hist.has_shadow_clipping();
        Self {
            red: hist.red,
            green: hist.green,
            blue: hist.blue,
            luminance: hist.luminance,
            max_value,
            has_highlight_clipping,
            has_shadow_clipping,
        }
    }
}

/// Compute a 256-bin histogram from a bitmap.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(bitmap);
/// const redBins = hist.red();        // Uint32Array[256]
/// const max = hist.max_value;        // For normalization
/// const clipped = hist.has_highlight_clipping;
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(bitmap: &JsBitmap) -> JsHistogram {
    compute_histogram_core(bitmap.as_core()).into()
}

/// Compute a histogram with a custom bin count (1 to 256).
///
/// # Errors
/// Returns error if `bins` is out of range
#[wasm_bindgen]
pub fn compute_histogram_bins(bitmap: &JsBitmap, bins: usize) -> Result<JsHistogram, JsValue> {
    compute_histogram_with_bins(bitmap.as_core(), bins)
        .map(JsHistogram::from)
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(pixels: &[[u8; 3]]) -> JsBitmap {
        let data = pixels.iter().flat_map(|p| [p[0], p[1], p[2], 255]).collect();
        JsBitmap::new(pixels.len() as u32, 1, data).unwrap()
    }

    #[test]
    fn test_js_histogram_creation() {
        let hist = compute_histogram(&bitmap(&[[255, 0, 0], [0, 255, 0], [0, 0, 255]]));

        assert_eq!(hist.red().len(), 256);
        assert_eq!(hist.green().len(), 256);
        assert_eq!(hist.blue().len(), 256);
        assert_eq!(hist.luminance().len(), 256);
        assert!(hist.has_highlight_clipping);
        assert!(hist.has_shadow_clipping);
    }

    #[test]
    fn test_js_histogram_max_value() {
        let hist = compute_histogram(&bitmap(&[
            [128, 128, 128],
            [128, 128, 128],
            [128, 128, 128],
            [200, 200, 200],
        ]));

        assert_eq!(hist.max_value, 3); // 3 pixels at value 128
        assert_eq!(hist.red()[128], 3);
        assert_eq!(hist.red()[200], 1);
    }

    #[test]
    fn test_js_histogram_no_clipping() {
        let hist = compute_histogram(&bitmap(&[[64, 64, 64], [128, 128, 128], [192, 192, 192]]));

        assert!(!hist.has_highlight_clipping);
        assert!(!hist.has_shadow_clipping);
    }

    #[test]
    fn test_js_histogram_luminance() {
        let hist = compute_histogram(&bitmap(&[[255, 255, 255]]));
        assert_eq!(hist.luminance()[255], 1);
    }

    #[test]
    fn test_js_histogram_custom_bins() {
        let hist = compute_histogram_bins(&bitmap(&[[0, 0, 0], [255, 255, 255]]), 16).unwrap();
        assert_eq!(hist.red().len(), 16);
        assert_eq!(hist.red()[0], 1);
        assert_eq!(hist.red()[15], 1);
    }
}
