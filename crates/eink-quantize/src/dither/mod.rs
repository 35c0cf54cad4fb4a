//! Error diffusion and pointwise quantization.
//!
//! # Architecture
//!
//! Diffusion is performed by a [`DitherEngine`]. Two strategies exist and
//! must agree pixel for pixel:
//!
//! - [`ReferenceDitherer`]: full-image [`WorkingBuffer`], per-call memo of
//!   matcher answers. Always available.
//! - [`WindowedDitherer`]: keeps only the rows the kernel can reach and asks
//!   the shared lookup cache directly. Used for [`Backend::Accelerated`].
//!
//! The [`Quantizer`](crate::Quantizer) picks one at construction and falls
//! back to the reference engine whenever the accelerated one reports an
//! [`EngineError`].
//!
//! Pointwise methods ([`DitherMethod::Simple`], [`DitherMethod::Nearest`],
//! [`DitherMethod::BlueNoise`]) diffuse nothing and live in
//! [`pointwise`] and [`blue_noise`].

pub mod blue_noise;
mod kernel;
mod options;
pub mod pointwise;
mod reference;
mod windowed;
mod working_buffer;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use kernel::{Kernel, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE};
pub use options::DitherOptions;
pub use reference::ReferenceDitherer;
pub use windowed::WindowedDitherer;
pub use working_buffer::WorkingBuffer;

use crate::api::UnknownVariant;
use crate::color::Rgb;
use crate::image::RgbImage;
use crate::matcher::ColorMatcher;

/// Quantization method selector.
///
/// Parsed from configuration names; the `_7color` suffixed names of the
/// calendar configuration are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMethod {
    /// Each pixel independently mapped by RGB Euclidean distance.
    Simple,
    /// Each pixel independently mapped by perceptual distance (cached).
    Nearest,
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
    /// Jarvis-Judice-Ninke error diffusion.
    JarvisJudiceNinke,
    /// Seeded random choice between the two nearest colors (experimental).
    BlueNoise,
}

impl DitherMethod {
    /// Diffusion kernel, if this method diffuses error.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherMethod::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherMethod::JarvisJudiceNinke => Some(&JARVIS_JUDICE_NINKE),
            DitherMethod::Simple | DitherMethod::Nearest | DitherMethod::BlueNoise => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DitherMethod::Simple => "simple",
            DitherMethod::Nearest => "nearest",
            DitherMethod::FloydSteinberg => "floyd_steinberg",
            DitherMethod::JarvisJudiceNinke => "jarvis_judice_ninke",
            DitherMethod::BlueNoise => "blue_noise",
        }
    }

    /// Parse a method name, falling back to Floyd-Steinberg with a warning.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownVariant| {
            tracing::warn!(%err, fallback = DitherMethod::default().as_str(), "Unknown dithering method");
            DitherMethod::default()
        })
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DitherMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "simple" => Ok(DitherMethod::Simple),
            "nearest" | "none" => Ok(DitherMethod::Nearest),
            "floyd_steinberg" | "floyd_steinberg_7color" | "fs" => Ok(DitherMethod::FloydSteinberg),
            "jarvis_judice_ninke" | "jarvis_judice_ninke_7color" | "jjn" => {
                Ok(DitherMethod::JarvisJudiceNinke)
            }
            "blue_noise" => Ok(DitherMethod::BlueNoise),
            _ => Err(UnknownVariant::new("dithering method", s)),
        }
    }
}

/// Diffusion strategy chosen once when a quantizer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Try the accelerated engine first, fall back to the reference engine.
    #[default]
    Accelerated,
    /// Always use the reference engine.
    Reference,
}

impl FromStr for Backend {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accelerated" | "fast" => Ok(Backend::Accelerated),
            "reference" => Ok(Backend::Reference),
            _ => Err(UnknownVariant::new("backend", s)),
        }
    }
}

/// Failure reported by a diffusion engine.
///
/// Any of these degrades the whole image to the reference engine; none is
/// fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Kernel reaches further down than the engine keeps rows for
    #[error("kernel {kernel} reaches {rows} rows ahead, engine holds {max}")]
    UnsupportedKernel {
        kernel: &'static str,
        rows: usize,
        max: usize,
    },

    /// Kernel would write to an already visited pixel, or has a zero divisor
    #[error("kernel {kernel} is not causal")]
    NonCausalKernel { kernel: &'static str },

    /// Engine produced a result of the wrong size
    #[error("engine returned {actual} pixels, expected {expected}")]
    OutputSize { expected: usize, actual: usize },

    /// Engine-specific failure
    #[error("{engine} engine failed: {reason}")]
    Failed { engine: &'static str, reason: String },
}

/// Row progress reported after every completed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherProgress {
    pub rows_done: usize,
    pub total_rows: usize,
}

impl DitherProgress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_done as f64 / self.total_rows as f64
        }
    }
}

/// An error diffusion strategy.
///
/// Implementations return one palette position per pixel in row-major
/// order. They must be deterministic and produce the same positions as
/// [`ReferenceDitherer`] for the same input, matcher, kernel and options.
pub trait DitherEngine: Send + Sync + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Diffuse `image` onto the matcher's palette.
    ///
    /// `progress` is called once after each row.
    fn diffuse(
        &self,
        image: &RgbImage,
        matcher: &ColorMatcher,
        kernel: &Kernel,
        options: &DitherOptions,
        progress: &mut dyn FnMut(DitherProgress),
    ) -> Result<Vec<u8>, EngineError>;
}

// ============================================================================
// Shared diffusion arithmetic
// ============================================================================
//
// Both engines go through these helpers so their float operations happen in
// the same order.

/// Column visit order for one row.
#[inline]
pub(crate) fn scan_order(width: usize, reverse: bool) -> Box<dyn Iterator<Item = usize>> {
    if reverse {
        Box::new((0..width).rev())
    } else {
        Box::new(0..width)
    }
}

/// Accumulated value minus the chosen palette color.
#[inline]
pub(crate) fn residual(value: [f32; 3], chosen: Rgb) -> [f32; 3] {
    let chosen = chosen.to_f32();
    [
        value[0] - chosen[0],
        value[1] - chosen[1],
        value[2] - chosen[2],
    ]
}

/// Add a weighted residual to a neighbour, clamping into [0, 255].
#[inline]
pub(crate) fn spread(cell: &mut [f32; 3], residual: [f32; 3], fraction: f32) {
    for c in 0..3 {
        cell[c] = (cell[c] + residual[c] * fraction).clamp(0.0, 255.0);
    }
}

/// Column of a neighbour at horizontal offset `dx`, if inside the row.
#[inline]
pub(crate) fn neighbour_x(x: usize, dx: i32, width: usize) -> Option<usize> {
    let nx = x as i64 + dx as i64;
    (nx >= 0 && (nx as usize) < width).then_some(nx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_aliases() {
        let cases = [
            ("floyd_steinberg_7color", DitherMethod::FloydSteinberg),
            ("Floyd-Steinberg", DitherMethod::FloydSteinberg),
            ("jarvis_judice_ninke_7color", DitherMethod::JarvisJudiceNinke),
            ("jjn", DitherMethod::JarvisJudiceNinke),
            ("simple", DitherMethod::Simple),
            ("nearest", DitherMethod::Nearest),
            ("blue_noise", DitherMethod::BlueNoise),
        ];
        for (name, expected) in cases {
            assert_eq!(name.parse::<DitherMethod>().unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_unknown_method_falls_back() {
        assert!("atkinson".parse::<DitherMethod>().is_err());
        assert_eq!(
            DitherMethod::from_name_or_default("atkinson"),
            DitherMethod::FloydSteinberg
        );
    }

    #[test]
    fn test_method_kernels() {
        assert_eq!(DitherMethod::FloydSteinberg.kernel(), Some(&FLOYD_STEINBERG));
        assert_eq!(DitherMethod::JarvisJudiceNinke.kernel(), Some(&JARVIS_JUDICE_NINKE));
        assert!(DitherMethod::Simple.kernel().is_none());
        assert!(DitherMethod::BlueNoise.kernel().is_none());
    }

    #[test]
    fn test_method_display_round_trip() {
        for m in [
            DitherMethod::Simple,
            DitherMethod::Nearest,
            DitherMethod::FloydSteinberg,
            DitherMethod::JarvisJudiceNinke,
            DitherMethod::BlueNoise,
        ] {
            assert_eq!(m.to_string().parse::<DitherMethod>().unwrap(), m);
        }
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("reference".parse::<Backend>().unwrap(), Backend::Reference);
        assert_eq!("Accelerated".parse::<Backend>().unwrap(), Backend::Accelerated);
        assert!("gpu".parse::<Backend>().is_err());
        assert_eq!(Backend::default(), Backend::Accelerated);
    }

    #[test]
    fn test_spread_clamps_each_addition() {
        let mut cell = [250.0, 5.0, 100.0];
        spread(&mut cell, [20.0, -20.0, 8.0], 0.5);
        assert_eq!(cell, [255.0, 0.0, 104.0]);
    }

    #[test]
    fn test_residual_and_neighbour() {
        assert_eq!(residual([128.0, 128.0, 128.0], Rgb::WHITE), [-127.0; 3]);
        assert_eq!(neighbour_x(0, -1, 4), None);
        assert_eq!(neighbour_x(3, 1, 4), None);
        assert_eq!(neighbour_x(2, -2, 4), Some(0));
    }

    #[test]
    fn test_progress_fraction() {
        let p = DitherProgress {
            rows_done: 1,
            total_rows: 4,
        };
        assert!((p.fraction() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_scan_order() {
        assert_eq!(scan_order(3, false).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(scan_order(3, true).collect::<Vec<_>>(), vec![2, 1, 0]);
    }
}
