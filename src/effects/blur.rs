//! Blur algorithms behind a common [`BlurAlgorithm`] seam.
//!
//! Both built-in variants are CPU implementations on premultiplied RGBA8 and
//! blur all four channels with clamp-to-edge sampling:
//!
//! - [`GaussianBlur`]: separable convolution, radius in `(0, 25]`.
//! - [`StackBlur`]: classic stack blur, whole-number radius `>= 1`.

pub mod gaussian;
pub mod stack;

pub use gaussian::GaussianBlur;
pub use stack::StackBlur;

use crate::foundation::{
    core::PixelBuffer,
    error::{AcrylicError, AcrylicResult},
};

/// Selects a blur implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurKind {
    Gaussian,
    Stack,
}

impl BlurKind {
    /// The built-in implementation for this tag.
    pub fn algorithm(self) -> &'static dyn BlurAlgorithm {
        match self {
            Self::Gaussian => &GaussianBlur,
            Self::Stack => &StackBlur,
        }
    }
}

/// Algorithm tag plus strength. The radius domain depends on the algorithm.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurConfig {
    pub kind: BlurKind,
    pub radius: f32,
}

impl BlurConfig {
    pub fn gaussian(radius: f32) -> Self {
        Self {
            kind: BlurKind::Gaussian,
            radius,
        }
    }

    pub fn stack(radius: u32) -> Self {
        Self {
            kind: BlurKind::Stack,
            radius: radius as f32,
        }
    }

    pub fn validate(&self) -> AcrylicResult<()> {
        self.kind.algorithm().validate_radius(self.radius)
    }

    pub fn apply(&self, src: &PixelBuffer) -> AcrylicResult<PixelBuffer> {
        self.kind.algorithm().blur(src, self.radius)
    }
}

/// Capability to blur a raster.
///
/// Implementations never mutate `src`; the returned buffer has the same
/// dimensions. An accelerated backend only needs to implement this trait.
pub trait BlurAlgorithm: Send + Sync {
    fn kind(&self) -> BlurKind;

    /// Reject radii outside the algorithm's domain with `InvalidArgument`.
    fn validate_radius(&self, radius: f32) -> AcrylicResult<()>;

    fn blur(&self, src: &PixelBuffer, radius: f32) -> AcrylicResult<PixelBuffer>;
}

fn ensure_non_empty(src: &PixelBuffer, algo: &str) -> AcrylicResult<()> {
    if src.is_empty() {
        return Err(AcrylicError::blur_failed(format!(
            "{algo} blur cannot process a {}x{} buffer",
            src.width(),
            src.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
