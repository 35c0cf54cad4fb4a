//! Error types for palette operations
//!
//! A palette that fails validation cannot back a matcher, so every variant
//! here is surfaced at construction time rather than at first use.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::Rgb;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// More entries than an output index byte can address
    #[error("palette has {len} colors, at most {max} are supported")]
    TooManyColors {
        /// Number of entries supplied
        len: usize,
        /// Maximum supported entries
        max: usize,
    },

    /// An entry has an empty (or whitespace-only) name
    #[error("palette entry at position {position} has an empty name")]
    EmptyName {
        /// Declaration position of the entry
        position: usize,
    },

    /// Two entries share a name
    #[error("duplicate color name {name:?} at position {position}")]
    DuplicateName {
        /// The repeated name
        name: String,
        /// Declaration position of the second occurrence
        position: usize,
    },

    /// Two entries share a wire index
    #[error("duplicate palette index {index} at position {position}")]
    DuplicateIndex {
        /// The repeated wire index
        index: u8,
        /// Declaration position of the second occurrence
        position: usize,
    },

    /// Two entries share an RGB value
    #[error("duplicate color {color} at position {position}")]
    DuplicateColor {
        /// The repeated color
        color: Rgb,
        /// Declaration position of the second occurrence
        position: usize,
    },

    /// Invalid hex color string for a named entry
    #[error("invalid color for {name:?}: {source}")]
    ParseColor {
        /// Name of the entry whose color failed to parse
        name: String,
        /// Underlying parse failure
        #[source]
        source: ParseColorError,
    },
}
