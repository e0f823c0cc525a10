//! Post-crop vignette.
//!
//! Pixel centers are mapped to a `[-1, 1] x [-1, 1]` frame. The distance from
//! the center is measured with the Euclidean norm, blended toward the max-norm
//! (a squarer shape) for negative roundness. Strength rises through a
//! smoothstep window placed by midpoint and feather.

use std::f32::consts::SQRT_2;

use super::smoothstep;
use crate::settings::VignetteSettings;

/// Vignette parameters resolved for one image size.
#[derive(Debug, Clone, Copy)]
pub struct Vignette {
    amount: f32,
    squareness: f32,
    edge0: f32,
    edge1: f32,
    protect: f32,
    width: f32,
    height: f32,
}

impl Vignette {
    /// Resolve settings for an image. Returns `None` when amount is zero.
    pub fn new(settings: &VignetteSettings, width: u32, height: u32) -> Option<Self> {
        if settings.is_neutral() {
            return None;
        }
        let mid = settings.midpoint / 100.0 * SQRT_2;
        let feather = settings.feather / 100.0;
        let edge0 = mid * (1.0 - feather);
        let edge1 = edge0 + feather.max(0.001);
        Some(Self {
            amount: settings.amount / 100.0,
            squareness: if settings.roundness < 0.0 {
                -settings.roundness / 100.0
            } else {
                0.0
            },
            edge0,
            edge1,
            protect: settings.highlights / 100.0,
            width: width as f32,
            height: height as f32,
        })
    }

    /// Falloff strength at pixel (x, y), in `[0, 1]`.
    pub fn strength(&self, x: u32, y: u32) -> f32 {
        let nx = (x as f32 + 0.5) / self.width * 2.0 - 1.0;
        let ny = (y as f32 + 0.5) / self.height * 2.0 - 1.0;
        let round = (nx * nx + ny * ny).sqrt();
        // Scale the max-norm so both shapes reach √2 in the corners
        let square = nx.abs().max(ny.abs()) * SQRT_2;
        let d = round + (square - round) * self.squareness;
        smoothstep(self.edge0, self.edge1, d)
    }

    /// Brightness multiplier at pixel (x, y) for a pixel of luminance `lum`.
    ///
    /// Positive amounts darken toward the edges, negative amounts brighten.
    /// Highlight protection pulls a darkening factor back toward 1 in
    /// proportion to the pixel's luminance.
    pub fn factor(&self, x: u32, y: u32, lum: f32) -> f32 {
        let strength = self.strength(x, y);
        if self.amount > 0.0 {
            let factor = 1.0 - strength * self.amount;
            factor + (1.0 - factor) * lum.clamp(0.0, 1.0) * self.protect
        } else {
            1.0 + strength * self.amount.abs()
        }
    }
}
