//! Public entry points.
//!
//! [`Quantizer`] ties a palette, its lookup cache and a diffusion backend
//! together; [`QuantizeError`] collects the crate's construction errors.

mod error;
mod quantizer;

pub use error::{QuantizeError, UnknownVariant};
pub use quantizer::{Quantizer, QuantizerBuilder};
