use std::{path::Path, sync::Arc};

use crate::{
    assets::{decode::load_overlay, noise::default_noise_texture},
    effects::{blur::BlurConfig, composite::LayerAlignment},
    foundation::core::{ArgbColor, PixelBuffer},
};

pub const DEFAULT_SCALE_FACTOR: f32 = 0.85;
pub const DEFAULT_STACK_RADIUS: u32 = 80;
pub const DEFAULT_SATURATION: f32 = 2.0;

/// Scalar knobs of a material. Serialisable so they can live in a JSON file.
///
/// Nothing is validated here; the pipeline checks everything once when it starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Pre-blur downscale in `(0, 1]`; 1.0 means no scaling.
    pub scale_factor: f32,
    pub blur: Option<BlurConfig>,
    /// 0.0 is grayscale, 1.0 identity, larger values oversaturate.
    pub saturation: f32,
    /// Translucent colour laid over the blurred background.
    pub tint: Option<ArgbColor>,
    pub alignment: LayerAlignment,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            blur: None,
            saturation: 1.0,
            tint: None,
            alignment: LayerAlignment::Stretch,
        }
    }
}

impl MaterialParams {
    /// Scalar part of the default preset: 0.85 scale, stack blur 80, saturation 2.0,
    /// overlays tiled.
    pub fn preset() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            blur: Some(BlurConfig::stack(DEFAULT_STACK_RADIUS)),
            saturation: DEFAULT_SATURATION,
            tint: None,
            alignment: LayerAlignment::Tile,
        }
    }
}

/// Everything one generation needs. Immutable; cheap to clone (rasters are shared).
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    params: MaterialParams,
    background: Option<Arc<PixelBuffer>>,
    noise: Option<Arc<PixelBuffer>>,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn params(&self) -> &MaterialParams {
        &self.params
    }

    pub fn background(&self) -> Option<&PixelBuffer> {
        self.background.as_deref()
    }

    pub fn noise(&self) -> Option<&PixelBuffer> {
        self.noise.as_deref()
    }
}

/// Fluent assembly of a [`Configuration`].
///
/// ```
/// use acrylic::{ArgbColor, Configuration, PixelBuffer, Rgba8Premul};
///
/// let bg = PixelBuffer::solid(64, 64, Rgba8Premul::from_straight_rgba(40, 90, 200, 255)).unwrap();
/// let config = Configuration::builder()
///     .background(bg)
///     .use_defaults()
///     .tint_color(ArgbColor(0x40FF_FFFF))
///     .build();
/// let out = acrylic::generate(&config).unwrap();
/// assert_eq!(out.dimensions(), (54, 54));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    pub fn background(mut self, background: impl Into<Arc<PixelBuffer>>) -> Self {
        self.config.background = Some(background.into());
        self
    }

    pub fn scale_by(mut self, factor: f32) -> Self {
        self.config.params.scale_factor = factor;
        self
    }

    /// Gaussian blur, radius in `(0, 25]`.
    pub fn gaussian_blur(self, radius: f32) -> Self {
        self.blur(BlurConfig::gaussian(radius))
    }

    /// Stack blur, radius `>= 1`.
    pub fn stack_blur(self, radius: u32) -> Self {
        self.blur(BlurConfig::stack(radius))
    }

    pub fn blur(mut self, blur: BlurConfig) -> Self {
        self.config.params.blur = Some(blur);
        self
    }

    pub fn saturation(mut self, amount: f32) -> Self {
        self.config.params.saturation = amount;
        self
    }

    /// Tint layer between the blurred background and the noise. Keep alpha below
    /// 255 or it hides everything underneath.
    pub fn tint_color(mut self, argb: impl Into<ArgbColor>) -> Self {
        self.config.params.tint = Some(argb.into());
        self
    }

    /// Topmost overlay texture.
    pub fn noise(mut self, noise: impl Into<Arc<PixelBuffer>>) -> Self {
        self.config.noise = Some(noise.into());
        self
    }

    /// Load the noise overlay from disk. A file that cannot be read or decoded
    /// is logged and skipped; the previous noise setting is kept.
    pub fn noise_file(self, path: &Path) -> Self {
        match load_overlay(path) {
            Some(noise) => self.noise(noise),
            None => self,
        }
    }

    pub fn alignment(mut self, alignment: LayerAlignment) -> Self {
        self.config.params.alignment = alignment;
        self
    }

    /// Replace all scalar settings at once, keeping background and noise.
    pub fn params(mut self, params: MaterialParams) -> Self {
        self.config.params = params;
        self
    }

    /// Scale by 0.85, stack blur 80, saturation 2.0 and the bundled noise texture
    /// tiled over the output. Settings applied after this call override it.
    pub fn use_defaults(self) -> Self {
        self.scale_by(DEFAULT_SCALE_FACTOR)
            .stack_blur(DEFAULT_STACK_RADIUS)
            .saturation(DEFAULT_SATURATION)
            .alignment(LayerAlignment::Tile)
            .noise(default_noise_texture())
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}

#[cfg(test)]
#[path = "../../tests/unit/material/config.rs"]
mod tests;
