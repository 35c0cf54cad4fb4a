//! Color types and conversion utilities
//!
//! This module provides the two color representations the quantizer works
//! with:
//!
//! - **Rgb**: 8-bit sRGB triples. Used for input rasters, palette entries
//!   and output pixels.
//! - **Lab**: CIE L\*a\*b\* (D65). Used only for perceptual distance.
//!
//! # Example
//!
//! ```
//! use eink_quantize::{Lab, Rgb};
//!
//! let orange = Rgb::new(255, 165, 0);
//! let lab = Lab::from(orange);
//! assert!(lab.l > 70.0 && lab.b > 0.0);
//! ```

mod lab;
mod lut;
mod rgb;

pub use lab::{rgb_to_lab, Lab};
pub use rgb::Rgb;
