//! Histogram computation for display.
//!
//! Counts red, green, blue and luminance values of a bitmap. Alpha is ignored.
//! The pipeline never reads a histogram; it exists for the editor UI.

use tracing::debug;

use crate::bitmap::{Bitmap, CHANNELS};
use crate::error::{Error, Result};
use crate::luminance::luminance_u8;

/// Default bin count: one bin per byte value.
pub const DEFAULT_BINS: usize = 256;

/// Per-channel and luminance histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub red: Vec<u32>,
    pub green: Vec<u32>,
    pub blue: Vec<u32>,
    pub luminance: Vec<u32>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_bins(DEFAULT_BINS)
    }
}

impl Histogram {
    /// Create a new empty 256-bin histogram
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bins(bins: usize) -> Self {
        Self {
            red: vec![0; bins],
            green: vec![0; bins],
            blue: vec![0; bins],
            luminance: vec![0; bins],
        }
    }

    /// Number of bins per channel.
    pub fn bins(&self) -> usize {
        self.red.len()
    }

    /// Find the maximum value across all channels for normalization
    pub fn max_value(&self) -> u32 {
        let max_r = self.red.iter().copied().max().unwrap_or(0);
        let max_g = self.green.iter().copied().max().unwrap_or(0);
        let max_b = self.blue.iter().copied().max().unwrap_or(0);
        max_r.max(max_g).max(max_b)
    }

    /// Check for highlight clipping (counts in the top bin)
    pub fn has_highlight_clipping(&self) -> bool {
        let last = self.bins().saturating_sub(1);
        self.red[last] > 0 || self.green[last] > 0 || self.blue[last] > 0
    }

    /// Check for shadow clipping (counts in the bottom bin)
    pub fn has_shadow_clipping(&self) -> bool {
        self.red[0] > 0 || self.green[0] > 0 || self.blue[0] > 0
    }
}

/// Bin index for a byte value when 256 values are spread over `bins` bins.
#[inline]
fn bin_of(value: u8, bins: usize) -> usize {
    value as usize * bins / 256
}

/// Compute a 256-bin histogram.
pub fn compute_histogram(bitmap: &Bitmap) -> Histogram {
    let mut hist = Histogram::new();
    fill(&mut hist, bitmap);
    hist
}

/// Compute a histogram with a custom bin count (1 to 256).
///
/// # Errors
/// [`Error::InvalidParameter`] if `bins` is 0 or greater than 256.
pub fn compute_histogram_with_bins(bitmap: &Bitmap, bins: usize) -> Result<Histogram> {
    if bins == 0 || bins > DEFAULT_BINS {
        return Err(Error::InvalidParameter(format!(
            "histogram bins must be between 1 and 256, got {}",
            bins
        )));
    }
    let mut hist = Histogram::with_bins(bins);
    fill(&mut hist, bitmap);
    Ok(hist)
}

fn fill(hist: &mut Histogram, bitmap: &Bitmap) {
    let bins = hist.bins();
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        bins,
        "Computing histogram"
    );

    for px in bitmap.pixels().chunks_exact(CHANNELS) {
        hist.red[bin_of(px[0], bins)] += 1;
        hist.green[bin_of(px[1], bins)] += 1;
        hist.blue[bin_of(px[2], bins)] += 1;
        let lum = luminance_u8(px[0], px[1], px[2]);
        hist.luminance[bin_of(lum, bins)] += 1;
    }
}
