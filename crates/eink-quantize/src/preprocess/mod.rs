//! Image adjustments applied before quantization.
//!
//! [`Enhancement`] bundles the tone adjustments that make small-palette
//! output read well on e-paper: extra saturation and contrast for color
//! panels, a gamma lift for monochrome ones.

mod enhance;

pub use enhance::Enhancement;
