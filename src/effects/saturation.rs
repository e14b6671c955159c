use crate::foundation::core::PixelBuffer;

/// Luminance weights of the standard saturation colour matrix.
pub const LUMA_R: f32 = 0.213;
pub const LUMA_G: f32 = 0.715;
pub const LUMA_B: f32 = 0.072;

/// Interpolate every pixel between its luminance and its colour.
///
/// `0.0` is grayscale, `1.0` is identity and larger values oversaturate. Any
/// amount is accepted; NaN leaves the buffer as is. Results are clamped to the
/// pixel's alpha (premultiplied storage), which itself is never changed.
pub fn saturate(src: &PixelBuffer, amount: f32) -> PixelBuffer {
    let mut out = src.clone();
    if amount == 1.0 || amount.is_nan() {
        return out;
    }

    for px in out.bytes_mut().chunks_exact_mut(4) {
        let max = f32::from(px[3]);
        let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        let lum = LUMA_R * r + LUMA_G * g + LUMA_B * b;
        for c in &mut px[..3] {
            let v = lum + (f32::from(*c) - lum) * amount;
            // inf * 0 when the channel already sits on the luminance.
            let v = if v.is_nan() { lum } else { v };
            *c = v.round().clamp(0.0, max) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/saturation.rs"]
mod tests;
