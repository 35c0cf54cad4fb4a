//! Named, indexed display palette with precomputed L\*a\*b\* values.
//!
//! Every entry carries the RGB value the panel expects, its L\*a\*b\*
//! conversion (computed once here, never again per pixel), and the small
//! integer the display driver uses on the wire.

use std::collections::HashSet;
use std::fmt;

use super::error::PaletteError;
use super::metric::DistanceMetric;
use crate::color::{Lab, Rgb};

/// Maximum number of entries; output positions are stored as `u8`.
const MAX_COLORS: usize = 256;

/// 7-color panel table (Waveshare 7.3" F): name, RGB, wire index.
const SEVEN_COLOR: [(&str, Rgb, u8); 7] = [
    ("BLACK", Rgb::new(0, 0, 0), 0),
    ("WHITE", Rgb::new(255, 255, 255), 1),
    ("GREEN", Rgb::new(0, 255, 0), 2),
    ("BLUE", Rgb::new(0, 0, 255), 3),
    ("RED", Rgb::new(255, 0, 0), 4),
    ("YELLOW", Rgb::new(255, 255, 0), 5),
    ("ORANGE", Rgb::new(255, 165, 0), 6),
];

const MONOCHROME: [(&str, Rgb, u8); 2] = [
    ("BLACK", Rgb::new(0, 0, 0), 0),
    ("WHITE", Rgb::new(255, 255, 255), 1),
];

/// One palette color.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    name: String,
    rgb: Rgb,
    lab: Lab,
    index: u8,
}

impl PaletteEntry {
    fn new(name: String, rgb: Rgb, index: u8) -> Self {
        Self {
            name,
            rgb,
            lab: Lab::from(rgb),
            index,
        }
    }

    /// Symbolic name, e.g. `"ORANGE"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact RGB value written to output pixels.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Precomputed L\*a\*b\* value of [`rgb`](Self::rgb).
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }

    /// Wire index understood by the display driver.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }
}

impl fmt::Display for PaletteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (index {})", self.name, self.rgb, self.index)
    }
}

/// An ordered, immutable set of named display colors.
///
/// Declaration order is significant: whenever two entries are equally
/// close to a color, the one declared first wins. Everything that returns
/// a "position" refers to this declaration order, not to the wire index.
///
/// # Example
///
/// ```
/// use eink_quantize::{Palette, Rgb};
///
/// let palette = Palette::new([
///     ("BLACK", Rgb::new(0, 0, 0), 0),
///     ("WHITE", Rgb::new(255, 255, 255), 1),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.entry(1).name(), "WHITE");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from `(name, rgb, wire index)` triples.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if no entries are given
    /// - [`PaletteError::TooManyColors`] beyond 256 entries
    /// - [`PaletteError::EmptyName`] for a blank name
    /// - [`PaletteError::DuplicateName`], [`PaletteError::DuplicateIndex`] or
    ///   [`PaletteError::DuplicateColor`] when two entries collide
    pub fn new<I, S>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, Rgb, u8)>,
        S: Into<String>,
    {
        let entries: Vec<PaletteEntry> = colors
            .into_iter()
            .map(|(name, rgb, index)| PaletteEntry::new(name.into(), rgb, index))
            .collect();

        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if entries.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                len: entries.len(),
                max: MAX_COLORS,
            });
        }

        let mut names = HashSet::new();
        let mut indices = HashSet::new();
        let mut colors = HashSet::new();
        for (position, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(PaletteError::EmptyName { position });
            }
            if !names.insert(entry.name.as_str()) {
                return Err(PaletteError::DuplicateName {
                    name: entry.name.clone(),
                    position,
                });
            }
            if !indices.insert(entry.index) {
                return Err(PaletteError::DuplicateIndex {
                    index: entry.index,
                    position,
                });
            }
            if !colors.insert(entry.rgb) {
                return Err(PaletteError::DuplicateColor {
                    color: entry.rgb,
                    position,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Build a palette from `(name, hex color, wire index)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the offending entry if a
    /// hex string is malformed, otherwise the same errors as [`Palette::new`].
    ///
    /// ```
    /// use eink_quantize::Palette;
    ///
    /// let palette = Palette::from_hex(&[("INK", "#000", 0), ("PAPER", "#FFFFFF", 1)]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex(colors: &[(&str, &str, u8)]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|&(name, hex, index)| {
                hex.parse::<Rgb>()
                    .map(|rgb| (name, rgb, index))
                    .map_err(|source| PaletteError::ParseColor {
                        name: name.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// The 7-color e-paper palette: BLACK, WHITE, GREEN, BLUE, RED, YELLOW,
    /// ORANGE with wire indices 0 to 6 in that order.
    pub fn seven_color() -> Self {
        Self::from_table(&SEVEN_COLOR)
    }

    /// Black and white, wire indices 0 and 1.
    pub fn monochrome() -> Self {
        Self::from_table(&MONOCHROME)
    }

    // Built-in tables are validated by tests, not at runtime.
    fn from_table(table: &[(&str, Rgb, u8)]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|&(name, rgb, index)| PaletteEntry::new(name.to_string(), rgb, index))
                .collect(),
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in declaration order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Entry at a declaration position.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len()`.
    #[inline]
    pub fn entry(&self, position: usize) -> &PaletteEntry {
        &self.entries[position]
    }

    /// Entry at a declaration position, if any.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&PaletteEntry> {
        self.entries.get(position)
    }

    /// Iterate over entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// Entry with the given name.
    pub fn by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Declaration position of an exact RGB value.
    pub fn position_of(&self, rgb: Rgb) -> Option<usize> {
        self.entries.iter().position(|e| e.rgb == rgb)
    }

    /// Wire indices in declaration order.
    pub fn wire_indices(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// Nearest entry to a L\*a\*b\* color by linear scan.
    ///
    /// Returns `(position, distance)`. Uses strict `<`, so the first
    /// declared entry wins ties.
    #[inline]
    pub fn find_nearest(&self, color: Lab, metric: DistanceMetric) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = metric.distance(color, entry.lab);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// The two nearest entries, nearest first.
    ///
    /// Equal distances keep declaration order. A single-entry palette
    /// returns that entry twice.
    pub fn two_nearest(&self, color: Lab, metric: DistanceMetric) -> (usize, usize) {
        let mut ranked: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, metric.distance(color, e.lab)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let first = ranked[0].0;
        let second = ranked.get(1).map_or(first, |r| r.0);
        (first, second)
    }

    /// Nearest entry by plain RGB Euclidean distance; first declared wins ties.
    pub fn nearest_rgb(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = color.distance_squared(entry.rgb);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
