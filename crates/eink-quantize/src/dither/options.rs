//! Scan configuration for error diffusion.

/// Configuration options for error diffusion dithering.
///
/// # Example
///
/// ```
/// use eink_quantize::DitherOptions;
///
/// let options = DitherOptions::new().serpentine(false);
/// assert!(!options.serpentine);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherOptions {
    /// Alternate the scan direction every row.
    ///
    /// Even rows run left to right and odd rows right to left with the
    /// kernel mirrored, which breaks up the diagonal "worm" patterns of a
    /// single scan direction.
    ///
    /// Default: `true`
    pub serpentine: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self { serpentine: true }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }

    /// Whether row `y` is scanned right to left.
    #[inline]
    pub fn is_reversed(&self, y: usize) -> bool {
        self.serpentine && y % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert!(DitherOptions::default().serpentine, "serpentine should default to true");
        assert_eq!(DitherOptions::new(), DitherOptions::default());
    }

    #[test]
    fn test_builder_serpentine() {
        let opts = DitherOptions::new().serpentine(false);
        assert!(!opts.serpentine);
        assert!(!opts.is_reversed(1));
    }

    #[test]
    fn test_rows_alternate() {
        let opts = DitherOptions::new();
        let dirs: Vec<bool> = (0..6).map(|y| opts.is_reversed(y)).collect();
        assert_eq!(dirs, vec![false, true, false, true, false, true]);
    }
}
