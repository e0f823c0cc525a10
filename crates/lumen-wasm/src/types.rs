//! WASM-compatible wrapper types for bitmaps.
//!
//! This module provides the JavaScript-facing bitmap type and the conversion
//! from core errors to `JsValue`.

use lumen_core::{Bitmap, Error};
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep bitmaps in WASM memory between
/// operations and only extract pixels for display.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// # Errors
    /// Returns error if a dimension is zero or the buffer length is not
    /// `width * height * 4`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        let inner = Bitmap::new(width, height, pixels).map_err(to_js_error)?;
        Ok(JsBitmap { inner })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    pub(crate) fn from_core(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &Bitmap {
        &self.inner
    }
}

/// Convert a core error into a JavaScript string error.
pub(crate) fn to_js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bitmap_creation() {
        let bmp = JsBitmap::new(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();
        assert_eq!(bmp.width(), 100);
        assert_eq!(bmp.height(), 50);
        assert_eq!(bmp.byte_length(), 20000);
    }

    #[test]
    fn test_js_bitmap_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 0];
        let bmp = JsBitmap::new(2, 1, pixels.clone()).unwrap();
        assert_eq!(bmp.pixels(), pixels);
    }

    #[test]
    fn test_from_core_round_trip() {
        let core = Bitmap::filled(3, 2, [1, 2, 3, 4]).unwrap();
        let bmp = JsBitmap::from_core(core.clone());
        assert_eq!(bmp.as_core(), &core);
    }
}
