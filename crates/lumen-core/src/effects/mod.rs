//! Position-dependent effects.
//!
//! These depend on where a pixel sits in the frame, not only on its color:
//!
//! - **Vignette**: brightness falloff toward the edges
//! - **Grain**: coordinate-hashed film grain
//! - **Lens**: radial distortion and chromatic aberration remapping

pub mod grain;
pub mod lens;
pub mod vignette;

pub use grain::{apply_grain, grain_noise, Grain};
pub use lens::LensRemap;
pub use vignette::Vignette;

/// Hermite smoothstep: `t²(3 - 2t)` with `t` clamped to `[0, 1]`.
///
/// `edge1` must be greater than `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
