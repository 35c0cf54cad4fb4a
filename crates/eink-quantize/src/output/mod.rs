//! Output types and helpers for quantized images.
//!
//! [`QuantizedImage`] stores one palette position per pixel and derives the
//! other formats on demand: RGB pixels, driver wire indices, and packed
//! N-bit rows for hardware upload. [`palette_preview`] and [`side_by_side`]
//! build diagnostic images.

mod pack;
mod preview;
mod quantized_image;

pub use pack::{min_bit_depth, pack_nbits, PackError};
pub use preview::{palette_preview, side_by_side};
pub use quantized_image::QuantizedImage;
