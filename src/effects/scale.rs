use std::borrow::Cow;

use crate::foundation::{
    core::PixelBuffer,
    error::{AcrylicError, AcrylicResult},
};

/// Downscale `src` by a uniform factor in `(0, 1]` using nearest-neighbour sampling.
///
/// Output dimensions are `round(dim * factor)`, at least 1 pixel each. A factor of
/// exactly `1.0` borrows `src` back without allocating.
pub fn scale(src: &PixelBuffer, factor: f32) -> AcrylicResult<Cow<'_, PixelBuffer>> {
    check_scale_factor(factor)?;
    if factor == 1.0 {
        return Ok(Cow::Borrowed(src));
    }

    let (w, h) = scaled_dimensions(src.width(), src.height(), factor);
    Ok(Cow::Owned(resize_nearest(src, w, h)?))
}

pub(crate) fn check_scale_factor(factor: f32) -> AcrylicResult<()> {
    if !(factor > 0.0 && factor <= 1.0) {
        return Err(AcrylicError::invalid_argument(format!(
            "scale factor must be in (0, 1], got {factor}"
        )));
    }
    Ok(())
}

/// Target dimensions for a scale factor; empty inputs stay empty.
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let dim = |v: u32| {
        if v == 0 {
            return 0;
        }
        ((f64::from(v) * f64::from(factor)).round() as u32).max(1)
    };
    (dim(width), dim(height))
}

/// Nearest-neighbour resample to an explicit size.
pub fn resize_nearest(src: &PixelBuffer, width: u32, height: u32) -> AcrylicResult<PixelBuffer> {
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    let mut out = PixelBuffer::zeroed(width, height)?;
    if src.is_empty() || width == 0 || height == 0 {
        return Ok(out);
    }

    let (sw, sh) = (src.width() as usize, src.height() as usize);
    let (dw, dh) = (width as usize, height as usize);
    let src_px = src.as_bytes();
    let dst_px = out.bytes_mut();

    for y in 0..dh {
        let sy = ((y * sh) / dh).min(sh - 1);
        for x in 0..dw {
            let sx = ((x * sw) / dw).min(sw - 1);
            let si = (sy * sw + sx) * 4;
            let di = (y * dw + x) * 4;
            dst_px[di..di + 4].copy_from_slice(&src_px[si..si + 4]);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scale.rs"]
mod tests;
