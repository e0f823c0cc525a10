//! Horizontal and vertical mirroring by exact index remapping.

use crate::bitmap::{Bitmap, CHANNELS};

/// Mirror left to right.
pub fn flip_horizontal(bitmap: &Bitmap) -> Bitmap {
    let row_bytes = bitmap.width() as usize * CHANNELS;
    let mut output = Vec::with_capacity(bitmap.pixels().len());
    for row in bitmap.pixels().chunks_exact(row_bytes) {
        for px in row.chunks_exact(CHANNELS).rev() {
            output.extend_from_slice(px);
        }
    }
    Bitmap::from_parts(bitmap.width(), bitmap.height(), output)
}

/// Mirror top to bottom.
pub fn flip_vertical(bitmap: &Bitmap) -> Bitmap {
    let row_bytes = bitmap.width() as usize * CHANNELS;
    let mut output = Vec::with_capacity(bitmap.pixels().len());
    for row in bitmap.pixels().chunks_exact(row_bytes).rev() {
        output.extend_from_slice(row);
    }
    Bitmap::from_parts(bitmap.width(), bitmap.height(), output)
}
