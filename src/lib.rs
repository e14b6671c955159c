//! Acrylic material (frosted glass) generation on RGBA8 rasters.
//!
//! A background image goes through a fixed pipeline and comes out as one
//! flattened raster:
//!
//! 1. **Scale**: optional nearest-neighbour downscale (cheaper blur).
//! 2. **Blur**: Gaussian or stack blur behind the [`BlurAlgorithm`] trait.
//! 3. **Saturate**: luminance-weighted saturation matrix.
//! 4. **Composite**: blurred base, optional tint colour, optional noise texture,
//!    stacked with the "over" operator.
//!
//! Pixels are **premultiplied** RGBA8 end-to-end; [`decode_image`] and
//! [`encode_png`] convert at the edges.
//!
//! ```
//! use acrylic::{Configuration, PixelBuffer, Rgba8Premul, generate};
//!
//! let bg = PixelBuffer::solid(100, 100, Rgba8Premul::from_straight_rgba(255, 0, 0, 255)).unwrap();
//! let config = Configuration::builder()
//!     .background(bg)
//!     .scale_by(0.5)
//!     .stack_blur(10)
//!     .saturation(0.0)
//!     .build();
//! let out = generate(&config).unwrap();
//! assert_eq!(out.dimensions(), (50, 50));
//! assert_eq!(out.pixel(0, 0).unwrap().to_array(), [54, 54, 54, 255]);
//! ```
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod foundation;
mod material;

pub use assets::decode::{decode_image, encode_png, load_image, load_overlay};
pub use assets::noise::{DEFAULT_NOISE_SIZE, default_noise_texture, dot_noise};
pub use effects::blur::{BlurAlgorithm, BlurConfig, BlurKind, GaussianBlur, StackBlur};
pub use effects::blur::gaussian::MAX_GAUSSIAN_RADIUS;
pub use effects::blur::stack::effective_radius;
pub use effects::composite::{Layer, LayerAlignment, composite, over};
pub use effects::saturation::saturate;
pub use effects::scale::{resize_nearest, scale, scaled_dimensions};
pub use foundation::core::{ArgbColor, PixelBuffer, Rgba8Premul};
pub use foundation::error::{AcrylicError, AcrylicResult};
pub use material::config::{
    Configuration, ConfigurationBuilder, DEFAULT_SATURATION, DEFAULT_SCALE_FACTOR,
    DEFAULT_STACK_RADIUS, MaterialParams,
};
pub use material::pipeline::{
    BatchOptions, Pipeline, PipelineObserver, Stage, TracingObserver, generate, generate_batch,
};
