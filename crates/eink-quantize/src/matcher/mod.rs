//! Nearest-palette-color lookup.
//!
//! [`LookupCache`] holds the nearest entry for every bucket of a coarse RGB
//! grid, computed eagerly; [`ColorMatcher`] pairs it with its [`Palette`]
//! and falls back to an exact scan when the grid has no answer.
//!
//! [`Palette`]: crate::Palette

mod color_matcher;
mod lookup_cache;

pub use color_matcher::ColorMatcher;
pub use lookup_cache::LookupCache;
