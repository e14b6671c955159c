use std::borrow::Cow;

use crate::{
    effects::scale::resize_nearest,
    foundation::{
        core::{PixelBuffer, Rgba8Premul},
        error::{AcrylicError, AcrylicResult},
    },
};

/// One entry of a layer stack. Slice order is z-order: index 0 is the bottom.
#[derive(Clone, Copy, Debug)]
pub enum Layer<'a> {
    Raster(&'a PixelBuffer),
    /// A colour that fills whatever bounds the base layer has.
    Solid(Rgba8Premul),
}

/// How raster layers whose size differs from the base are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerAlignment {
    /// Nearest-neighbour resize to the base dimensions.
    #[default]
    Stretch,
    /// Repeat the layer from the top-left corner at its native size.
    Tile,
    /// Fail with `DimensionMismatch`.
    Strict,
}

/// Flatten `layers` bottom-up with the premultiplied "over" operator.
///
/// The first layer must be a raster; it defines the output size and is copied,
/// so a single-layer stack returns a pixel-identical buffer.
pub fn composite(layers: &[Layer<'_>], alignment: LayerAlignment) -> AcrylicResult<PixelBuffer> {
    let (base, rest) = layers
        .split_first()
        .ok_or_else(|| AcrylicError::invalid_argument("composite requires at least one layer"))?;
    let Layer::Raster(base) = base else {
        return Err(AcrylicError::invalid_argument(
            "composite base layer must be a raster",
        ));
    };

    let mut out = (*base).clone();
    for (i, layer) in rest.iter().enumerate() {
        match *layer {
            Layer::Solid(color) => {
                if color.a != 0 {
                    blend_pixels(&mut out, std::iter::repeat(color));
                }
            }
            Layer::Raster(top) => {
                let top = align(top, out.dimensions(), alignment, i + 1)?;
                blend_pixels(&mut out, top.pixels());
            }
        }
    }
    Ok(out)
}

fn align<'a>(
    layer: &'a PixelBuffer,
    (width, height): (u32, u32),
    alignment: LayerAlignment,
    index: usize,
) -> AcrylicResult<Cow<'a, PixelBuffer>> {
    if layer.dimensions() == (width, height) {
        return Ok(Cow::Borrowed(layer));
    }
    match alignment {
        LayerAlignment::Stretch => Ok(Cow::Owned(resize_nearest(layer, width, height)?)),
        LayerAlignment::Tile => Ok(Cow::Owned(tile(layer, width, height)?)),
        LayerAlignment::Strict => Err(AcrylicError::dimension_mismatch(format!(
            "layer {index} is {}x{}, base is {width}x{height}",
            layer.width(),
            layer.height()
        ))),
    }
}

/// Repeat `src` over a `width x height` canvas. An empty source tiles to transparency.
fn tile(src: &PixelBuffer, width: u32, height: u32) -> AcrylicResult<PixelBuffer> {
    let mut out = PixelBuffer::zeroed(width, height)?;
    if src.is_empty() || width == 0 {
        return Ok(out);
    }

    let stride = src.width() as usize * 4;
    let sh = src.height() as usize;
    for (y, row) in out.bytes_mut().chunks_exact_mut(width as usize * 4).enumerate() {
        let src_row = &src.as_bytes()[(y % sh) * stride..][..stride];
        for span in row.chunks_mut(stride) {
            span.copy_from_slice(&src_row[..span.len()]);
        }
    }
    Ok(out)
}

fn blend_pixels(out: &mut PixelBuffer, top: impl Iterator<Item = Rgba8Premul>) {
    for (dst, src) in out.bytes_mut().chunks_exact_mut(4).zip(top) {
        let px = over(Rgba8Premul::from_array([dst[0], dst[1], dst[2], dst[3]]), src);
        dst.copy_from_slice(&px.to_array());
    }
}

/// Porter-Duff source-over for premultiplied pixels: `src + dst * (1 - src.a)`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul) -> Rgba8Premul {
    match src.a {
        0 => dst,
        255 => src,
        sa => {
            let keep = 255 - u32::from(sa);
            let blend = |s: u8, d: u8| s.saturating_add(((u32::from(d) * keep + 127) / 255) as u8);
            Rgba8Premul {
                r: blend(src.r, dst.r),
                g: blend(src.g, dst.g),
                b: blend(src.b, dst.b),
                a: blend(sa, dst.a),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
