//! Bilinear sampling at fractional coordinates.

/// Sample an interleaved `C`-channel buffer at pixel coordinates `(x, y)`.
///
/// Integer coordinates hit pixel centers exactly. Coordinates that are
/// negative or at least the image dimension return all zeros (transparent
/// black). Inside the image, neighbors past the last row or column reuse the
/// edge pixel.
#[inline]
pub fn sample_bilinear<T, const C: usize>(
    data: &[T],
    width: usize,
    height: usize,
    x: f32,
    y: f32,
) -> [f32; C]
where
    T: Copy + Into<f32>,
{
    let mut out = [0.0f32; C];
    if !(x >= 0.0 && y >= 0.0 && x < width as f32 && y < height as f32) {
        return out;
    }

    let x0 = (x.floor() as usize).min(width - 1);
    let y0 = (y.floor() as usize).min(height - 1);
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let i00 = (y0 * width + x0) * C;
    let i10 = (y0 * width + x1) * C;
    let i01 = (y1 * width + x0) * C;
    let i11 = (y1 * width + x1) * C;

    for (c, v) in out.iter_mut().enumerate() {
        let p00: f32 = data[i00 + c].into();
        let p10: f32 = data[i10 + c].into();
        let p01: f32 = data[i01 + c].into();
        let p11: f32 = data[i11 + c].into();
        let top = p00 + (p10 - p00) * fx;
        let bottom = p01 + (p11 - p01) * fx;
        *v = top + (bottom - top) * fy;
    }
    out
}
