#![allow(clippy::module_inception, clippy::needless_range_loop)]

//! eink-quantize: perceptual palette quantization for e-ink displays
//!
//! Maps true-color rasters onto a small fixed display palette (seven named
//! colors, or black and white) using CIE L\*a\*b\* distances, a precomputed
//! nearest-color cache, and error diffusion with serpentine scanning.
//!
//! # Quick Start
//!
//! ```
//! use eink_quantize::{DitherMethod, Palette, Quantizer, Rgb, RgbImage};
//!
//! let quantizer = Quantizer::new(Palette::seven_color()).unwrap();
//!
//! let image = RgbImage::filled(4, 4, Rgb::new(250, 150, 30)).unwrap();
//! let result = quantizer.dither(&image, DitherMethod::FloydSteinberg);
//!
//! // Every output pixel is an exact palette color.
//! let palette = quantizer.palette();
//! assert!(result.to_rgb().iter().all(|&p| palette.position_of(p).is_some()));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Palette  ──(L*a*b* once)──►  LookupCache (coarse RGB grid)
//!     │                              │
//!     └──────────► ColorMatcher ◄────┘
//!                      │
//! RgbImage ──► DitherEngine (reference | windowed) ──► QuantizedImage
//! ```
//!
//! # Methods
//!
//! - **Floyd-Steinberg** and **Jarvis-Judice-Ninke** error diffusion
//! - **Nearest**: perceptual nearest color per pixel
//! - **Simple**: RGB Euclidean nearest color per pixel
//! - **Blue noise** (experimental): seeded choice between the two nearest
//!   colors
//!
//! # Distance
//!
//! Matching uses a simplified CIEDE2000-like metric (unit weights, no hue
//! rotation). With unit weights the chroma and hue terms recombine into the
//! a/b difference, so it ranks colors the same way CIE76 does; both are
//! available through [`DistanceMetric`].

mod analysis;
mod api;
mod color;
pub mod dither;
mod image;
mod matcher;
mod output;
mod palette;
mod preprocess;


pub use analysis::{analyze_colors, ColorCount};
pub use api::{QuantizeError, Quantizer, QuantizerBuilder, UnknownVariant};
pub use color::{rgb_to_lab, Lab, Rgb};
pub use dither::{
    Backend, DitherEngine, DitherMethod, DitherOptions, DitherProgress, EngineError, Kernel,
    ReferenceDitherer, WindowedDitherer,
};
pub use image::{ImageError, RgbImage};
pub use matcher::{ColorMatcher, LookupCache};
pub use output::{min_bit_depth, pack_nbits, palette_preview, side_by_side, PackError, QuantizedImage};
pub use palette::{
    delta_e_cie76, delta_e_ciede2000_simplified, DistanceMetric, Palette, PaletteEntry, PaletteError,
    ParseColorError,
};
pub use preprocess::Enhancement;
