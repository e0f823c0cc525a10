//! Deterministic film grain.
//!
//! Noise comes from a sine hash of the grain-cell coordinate and a seed, so
//! the same (x, y, seed) always yields the same value. The seed is chosen by
//! the caller once per image.

use crate::settings::GrainSettings;

/// Sine hash noise in `[0, 1)`.
///
/// `frac(sin(x * 12.9898 + y * 78.233 + seed) * 43758.5453)`, evaluated in
/// `f64` so results do not depend on `f32` rounding.
#[inline]
pub fn grain_noise(x: f64, y: f64, seed: f64) -> f64 {
    let v = (x * 12.9898 + y * 78.233 + seed).sin() * 43758.5453;
    v - v.floor()
}

/// Grain parameters resolved once per image.
#[derive(Debug, Clone, Copy)]
pub struct Grain {
    cell: f64,
    intensity: f32,
    monochrome: bool,
    seed: u32,
}

impl Grain {
    /// Resolve settings. Returns `None` when amount is zero.
    pub fn new(settings: &GrainSettings, seed: u32) -> Option<Self> {
        if settings.is_neutral() {
            return None;
        }
        Some(Self {
            cell: 1.0 + settings.size as f64 / 100.0 * 3.0,
            intensity: settings.amount / 100.0 * (0.5 + settings.roughness / 200.0) * 0.2,
            monochrome: settings.monochrome,
            seed,
        })
    }

    /// Per-channel perturbation at pixel (x, y).
    pub fn perturbation(&self, x: u32, y: u32) -> [f32; 3] {
        let gx = (x as f64 / self.cell).floor();
        let gy = (y as f64 / self.cell).floor();
        let sample = |offset: u32| {
            let n = grain_noise(gx, gy, self.seed.wrapping_add(offset) as f64);
            (n as f32 - 0.5) * self.intensity
        };
        if self.monochrome {
            let d = sample(0);
            [d, d, d]
        } else {
            [sample(0), sample(1), sample(2)]
        }
    }
}

/// Add grain to one normalized pixel.
#[inline]
pub fn apply_grain(r: f32, g: f32, b: f32, x: u32, y: u32, grain: &Grain) -> (f32, f32, f32) {
    let [dr, dg, db] = grain.perturbation(x, y);
    (r + dr, g + dg, b + db)
}
