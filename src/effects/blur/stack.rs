use crate::{
    effects::blur::{BlurAlgorithm, BlurKind, ensure_non_empty},
    foundation::{
        core::PixelBuffer,
        error::{AcrylicError, AcrylicResult},
    },
};

/// Stack blur: a triangular-kernel running-sum blur, horizontal then vertical.
///
/// The effective radius is clamped to half the smaller image dimension; a
/// buffer with a 1px side therefore comes back unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackBlur;

impl BlurAlgorithm for StackBlur {
    fn kind(&self) -> BlurKind {
        BlurKind::Stack
    }

    fn validate_radius(&self, radius: f32) -> AcrylicResult<()> {
        if !(radius >= 1.0 && radius.is_finite() && radius.fract() == 0.0) {
            return Err(AcrylicError::invalid_argument(format!(
                "stack blur radius must be a whole number >= 1, got {radius}"
            )));
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, src), fields(w = src.width(), h = src.height()))]
    fn blur(&self, src: &PixelBuffer, radius: f32) -> AcrylicResult<PixelBuffer> {
        self.validate_radius(radius)?;
        ensure_non_empty(src, "stack")?;

        let (width, height) = src.dimensions();
        let r = effective_radius(radius as u32, width, height);
        let mut out = src.clone();
        if r == 0 {
            return Ok(out);
        }

        let (w, h) = (width as usize, height as usize);
        let mut blurrer = LineBlur::new(r as usize);
        let px = out.bytes_mut();

        for y in 0..h {
            blurrer.run(px, y * w, 1, w);
        }
        for x in 0..w {
            blurrer.run(px, x, w, h);
        }
        Ok(out)
    }
}

/// Radius actually applied for a `width x height` image.
pub fn effective_radius(radius: u32, width: u32, height: u32) -> u32 {
    radius.min(width.min(height) / 2)
}

/// Reusable scratch state for blurring one line of pixels in place.
struct LineBlur {
    radius: usize,
    stack: Vec<[u64; 4]>,
    line: Vec<[u64; 4]>,
}

impl LineBlur {
    fn new(radius: usize) -> Self {
        Self {
            radius,
            stack: vec![[0; 4]; 2 * radius + 1],
            line: Vec::new(),
        }
    }

    /// Blur `len` pixels starting at pixel index `start`, `step` pixels apart.
    fn run(&mut self, px: &mut [u8], start: usize, step: usize, len: usize) {
        let r = self.radius;
        let div = 2 * r + 1;
        let div_sum = ((r + 1) * (r + 1)) as u64;
        let last = len - 1;

        self.line.clear();
        self.line.extend((0..len).map(|i| {
            let idx = (start + i * step) * 4;
            [
                u64::from(px[idx]),
                u64::from(px[idx + 1]),
                u64::from(px[idx + 2]),
                u64::from(px[idx + 3]),
            ]
        }));

        let mut sum = [0u64; 4];
        let mut sum_in = [0u64; 4];
        let mut sum_out = [0u64; 4];

        // Left half (offsets -r..=0) repeats the first pixel.
        let first = self.line[0];
        for i in 0..=r {
            self.stack[i] = first;
            for c in 0..4 {
                sum[c] += first[c] * (i as u64 + 1);
                sum_out[c] += first[c];
            }
        }
        for i in 1..=r {
            let p = self.line[i.min(last)];
            self.stack[i + r] = p;
            for c in 0..4 {
                sum[c] += p[c] * (r + 1 - i) as u64;
                sum_in[c] += p[c];
            }
        }

        let mut sp = r;
        for x in 0..len {
            let idx = (start + x * step) * 4;
            for c in 0..4 {
                px[idx + c] = (sum[c] / div_sum).min(255) as u8;
                sum[c] -= sum_out[c];
            }

            let stack_start = (sp + div - r) % div;
            let incoming = self.line[(x + r + 1).min(last)];
            for c in 0..4 {
                sum_out[c] -= self.stack[stack_start][c];
                sum_in[c] += incoming[c];
                sum[c] += sum_in[c];
            }
            self.stack[stack_start] = incoming;

            sp = (sp + 1) % div;
            let centre = self.stack[sp];
            for c in 0..4 {
                sum_out[c] += centre[c];
                sum_in[c] -= centre[c];
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/effects/blur/stack.rs"]
mod tests;
