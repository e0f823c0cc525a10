//! Lumen WASM - WebAssembly bindings for Lumen
//!
//! This crate provides WASM bindings to expose the lumen-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible bitmap wrapper
//! - `pipeline` - Full adjustment pipeline from a settings object
//! - `transform` - Rotation, flip and crop
//! - `lut` - Lookup table fast path
//! - `histogram` - Histogram computation
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsBitmap, process_image } from '@lumen/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const source = new JsBitmap(width, height, rgbaBytes);
//! const edited = process_image(source, { basic: { exposure: 0.5 } }, seed);
//! ```

use wasm_bindgen::prelude::*;

mod histogram;
mod lut;
mod pipeline;
mod transform;
mod types;

// Re-export public types
pub use histogram::{compute_histogram, compute_histogram_bins, JsHistogram};
pub use lut::{apply_luts, JsLut};
pub use pipeline::{default_settings, process_image};
pub use transform::{apply_crop, apply_rotation, flip_horizontal, flip_vertical};
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
