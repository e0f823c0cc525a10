//! Lumen Core - Photo adjustment pipeline
//!
//! This crate provides the non-destructive editing engine for Lumen: tonal
//! and color adjustments, tone curves, spatial filters, creative effects,
//! geometric transforms and histograms over RGBA bitmaps.
//!
//! Every operation reads an immutable input and returns a new bitmap, so an
//! editor can keep one source image and reprocess it whenever a setting
//! changes.
//!
//! # Feature Flags
//!
//! - `parallel` (default): process rows in parallel with rayon

pub mod adjustments;
pub mod bitmap;
pub mod color;
pub mod curve;
pub mod effects;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod hsl;
pub mod lut;
pub mod luminance;
pub mod pipeline;
pub mod settings;
pub mod transform;

mod rows;

pub use bitmap::Bitmap;
pub use curve::{CurvePoint, ToneCurve};
pub use error::{Error, Result};
pub use histogram::{compute_histogram, compute_histogram_with_bins, Histogram};
pub use hsl::HueBand;
pub use lut::{apply_luts, Lut};
pub use pipeline::process;
pub use settings::{
    AdjustmentSettings, BasicSettings, ColorSettings, CropRect, CurveSettings, DetailSettings,
    EffectsSettings, GrainSettings, HslBand, HslSettings, LensCorrectionSettings,
    SplitToningSettings, TransformSettings, VignetteSettings,
};
pub use transform::{apply_crop, apply_rotation, apply_transforms, compute_rotated_bounds};
