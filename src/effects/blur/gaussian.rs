use crate::{
    effects::blur::{BlurAlgorithm, BlurKind, ensure_non_empty},
    foundation::{
        core::PixelBuffer,
        error::{AcrylicError, AcrylicResult},
    },
};

/// Largest accepted Gaussian radius.
pub const MAX_GAUSSIAN_RADIUS: f32 = 25.0;

/// Separable Gaussian blur with a Q16 fixed-point kernel, rows first, then columns.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianBlur;

impl BlurAlgorithm for GaussianBlur {
    fn kind(&self) -> BlurKind {
        BlurKind::Gaussian
    }

    fn validate_radius(&self, radius: f32) -> AcrylicResult<()> {
        if !(radius > 0.0 && radius <= MAX_GAUSSIAN_RADIUS) {
            return Err(AcrylicError::invalid_argument(format!(
                "gaussian blur radius must be in (0, {MAX_GAUSSIAN_RADIUS}], got {radius}"
            )));
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, src), fields(w = src.width(), h = src.height()))]
    fn blur(&self, src: &PixelBuffer, radius: f32) -> AcrylicResult<PixelBuffer> {
        self.validate_radius(radius)?;
        ensure_non_empty(src, "gaussian")?;

        let kernel = Kernel::for_radius(radius);
        let (w, h) = (src.width() as usize, src.height() as usize);
        let mut rows = PixelBuffer::zeroed(src.width(), src.height())?;
        let mut out = PixelBuffer::zeroed(src.width(), src.height())?;

        for y in 0..h {
            kernel.convolve(src.as_bytes(), rows.bytes_mut(), y * w, 1, w);
        }
        for x in 0..w {
            kernel.convolve(rows.as_bytes(), out.bytes_mut(), x, w, h);
        }
        Ok(out)
    }
}

/// Normalised taps in Q16; they always sum to exactly [`Kernel::ONE`].
struct Kernel {
    taps: Vec<u32>,
}

impl Kernel {
    const ONE: u32 = 1 << 16;

    /// `ceil(radius)` taps each side of the centre, `sigma = 0.4 * radius + 0.6`.
    /// `radius` must already be validated.
    fn for_radius(radius: f32) -> Self {
        let half = radius.ceil() as i32;
        let sigma = f64::from(0.4 * radius + 0.6);
        let weights: Vec<f64> = (-half..=half)
            .map(|i| (-f64::from(i * i) / (2.0 * sigma * sigma)).exp())
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps: Vec<u32> = weights
            .iter()
            .map(|w| (w / total * f64::from(Self::ONE)).round() as u32)
            .collect();
        // Rounding residue lands on the centre tap so flat regions stay exact.
        let assigned: u32 = taps.iter().sum();
        let centre = taps.len() / 2;
        taps[centre] = (taps[centre] + Self::ONE).saturating_sub(assigned);
        Self { taps }
    }

    fn half_width(&self) -> usize {
        self.taps.len() / 2
    }

    /// Convolve `len` pixels starting at pixel index `start`, `step` pixels
    /// apart, from `src` into the same positions of `dst`. Samples past either
    /// end repeat the edge pixel.
    fn convolve(&self, src: &[u8], dst: &mut [u8], start: usize, step: usize, len: usize) {
        let half = self.half_width();
        let last = len - 1;
        for i in 0..len {
            let mut acc = [0u32; 4];
            for (k, &tap) in self.taps.iter().enumerate() {
                let j = (i + k).saturating_sub(half).min(last);
                let at = (start + j * step) * 4;
                for (sum, &c) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *sum += tap * u32::from(c);
                }
            }
            let at = (start + i * step) * 4;
            for (d, sum) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((sum + Self::ONE / 2) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/blur/gaussian.rs"]
mod tests;
