//! Pokeink - e-ink image quantization
//!
//! Application layer over `eink-quantize`: configuration, PNG I/O and the
//! enhance-then-dither pipeline. This library exposes modules for
//! integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
