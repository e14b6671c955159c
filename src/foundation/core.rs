use std::{fmt, str::FromStr};

use crate::foundation::error::{AcrylicError, AcrylicResult};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha colour.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Bytes in buffer order: `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Read an already premultiplied `[r, g, b, a]` pixel.
    pub fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

/// Packed 32-bit `0xAARRGGBB` colour, as handed over by UI toolkits for tints.
///
/// Serialises as a `#AARRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArgbColor(pub u32);

impl ArgbColor {
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.red(), self.green(), self.blue(), self.alpha())
    }
}

impl From<u32> for ArgbColor {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for ArgbColor {
    type Err = AcrylicError;

    /// Accepts `#AARRGGBB`, `#RRGGBB` (opaque) and the same forms with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let hex = t
            .strip_prefix('#')
            .or_else(|| t.strip_prefix("0x"))
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);

        let parse = |h: &str| {
            u32::from_str_radix(h, 16)
                .map_err(|_| AcrylicError::invalid_argument(format!("invalid color '{s}'")))
        };

        match hex.len() {
            8 => Ok(Self(parse(hex)?)),
            6 => Ok(Self(0xFF00_0000 | parse(hex)?)),
            _ => Err(AcrylicError::invalid_argument(format!(
                "color '{s}' must be #AARRGGBB or #RRGGBB"
            ))),
        }
    }
}

impl fmt::Display for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl TryFrom<String> for ArgbColor {
    type Error = AcrylicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArgbColor> for String {
    fn from(value: ArgbColor) -> Self {
        value.to_string()
    }
}

/// RGBA8 raster with premultiplied alpha, row-major, tightly packed.
///
/// The byte length is always `width * height * 4`; constructors enforce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap already premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> AcrylicResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(AcrylicError::invalid_argument(format!(
                "pixel data is {} bytes, expected {expected} for {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> AcrylicResult<Self> {
        byte_len(width, height)?;
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// A buffer filled with one colour.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> AcrylicResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: color.to_array().repeat(len / 4),
        })
    }

    /// Caller guarantees `data.len() == width * height * 4`.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub(crate) fn zeroed(width: u32, height: u32) -> AcrylicResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]))
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgba8Premul> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]))
    }

    /// Un-premultiplied copy of the pixel data, for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> AcrylicResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| AcrylicError::invalid_argument("pixel buffer size overflow"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = premul(px[0], a);
        px[1] = premul(px[1], a);
        px[2] = premul(px[2], a);
    }
}

fn premul(c: u8, a: u8) -> u8 {
    let c = u16::from(c);
    let a = u16::from(a);
    (((c * a) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
