use std::sync::{Arc, OnceLock};

use crate::foundation::core::{PixelBuffer, Rgba8Premul};

pub const DEFAULT_NOISE_SIZE: u16 = 128;
pub const DEFAULT_NOISE_SEED: u64 = 0x5EED_AC41_1C00_0001;

/// Share of pixels (in 1/256 units) that carry a dot.
const DOT_DENSITY: u64 = 40;

/// The bundled overlay used by the default preset: a 128x128 tile of light grey
/// dot noise, mostly transparent. The preset repeats it with
/// [`LayerAlignment::Tile`](crate::LayerAlignment::Tile). Built once and shared.
pub fn default_noise_texture() -> Arc<PixelBuffer> {
    static TEXTURE: OnceLock<Arc<PixelBuffer>> = OnceLock::new();
    TEXTURE
        .get_or_init(|| {
            Arc::new(dot_noise(
                DEFAULT_NOISE_SIZE,
                DEFAULT_NOISE_SIZE,
                DEFAULT_NOISE_SEED,
            ))
        })
        .clone()
}

/// Deterministic light grey dot noise. Same inputs, same pixels.
pub fn dot_noise(width: u16, height: u16, seed: u64) -> PixelBuffer {
    let mut data = Vec::with_capacity(usize::from(width) * usize::from(height) * 4);
    for y in 0..u64::from(height) {
        for x in 0..u64::from(width) {
            let h = mix64(seed ^ (y << 32 | x));
            let px = if h & 0xFF < DOT_DENSITY {
                let grey = 190 + ((h >> 8) % 50) as u8;
                let alpha = 24 + ((h >> 16) % 40) as u8;
                Rgba8Premul::from_straight_rgba(grey, grey, grey, alpha)
            } else {
                Rgba8Premul::transparent()
            };
            data.extend_from_slice(&px.to_array());
        }
    }
    PixelBuffer::from_parts(u32::from(width), u32::from(height), data)
}

fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/noise.rs"]
mod tests;
