//! Spatial operators: operations that need a pixel's neighborhood.
//!
//! The blur clamps sample coordinates to the image (edge replicate) while the
//! bilinear sampler returns zero outside it. Each call site picks the policy
//! it needs.

pub mod blur;
pub mod sample;
pub mod sharpen;

pub use blur::{blur_plane, gaussian_blur, gaussian_kernel, MAX_BLUR_RADIUS};
pub use sample::sample_bilinear;
pub use sharpen::{clarity_channel, unsharp_channel, unsharp_mask, CLARITY_RADIUS};
