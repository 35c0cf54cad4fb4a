//! Palette types and perceptual distance
//!
//! This module provides the immutable [`Palette`] of named, indexed display
//! colors, the [`DistanceMetric`] used to compare colors in L\*a\*b\* space,
//! and the error types for palette construction and color parsing.

mod error;
mod metric;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use metric::{delta_e_cie76, delta_e_ciede2000_simplified, DistanceMetric};
pub use palette::{Palette, PaletteEntry};
