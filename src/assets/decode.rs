use std::path::Path;

use anyhow::Context;

use crate::foundation::{core::PixelBuffer, error::AcrylicResult};

/// Decode any format supported by the `image` crate into a premultiplied buffer.
pub fn decode_image(bytes: &[u8]) -> AcrylicResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_straight_rgba8(width, height, rgba.into_raw())
}

pub fn load_image(path: &Path) -> AcrylicResult<PixelBuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let buf =
        decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(buf)
}

/// Best-effort load for overlay textures: failures are logged and yield `None`.
pub fn load_overlay(path: &Path) -> Option<PixelBuffer> {
    match load_image(path) {
        Ok(buf) if !buf.is_empty() => Some(buf),
        Ok(_) => {
            tracing::warn!(path = %path.display(), "overlay texture is empty; ignoring it");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unable to load overlay texture; ignoring it");
            None
        }
    }
}

/// Un-premultiply and write `buf` as a PNG, creating parent directories.
pub fn encode_png(buf: &PixelBuffer, path: &Path) -> AcrylicResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &buf.to_straight_rgba8(),
        buf.width(),
        buf.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
