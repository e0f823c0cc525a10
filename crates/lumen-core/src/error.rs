//! Error types for pipeline operations.

use thiserror::Error;

/// Error types for image processing calls.
///
/// Settings values that fall outside their documented ranges are not errors;
/// they are clamped (see [`crate::AdjustmentSettings::clamped`]). Only
/// structurally malformed input fails a call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Width or height is zero.
    #[error("Invalid bitmap dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not equal width * height * 4.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Curve has fewer than two points or x values that are not strictly increasing.
    #[error("Malformed curve: {0}")]
    MalformedCurve(String),

    /// A structural parameter of a sub-operation is unusable (e.g. zero histogram bins).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
