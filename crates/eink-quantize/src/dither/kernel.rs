//! Error diffusion kernel definitions.
//!
//! Each kernel lists the not-yet-visited neighbours that receive a share of
//! a pixel's quantization residual.

/// An error diffusion kernel.
///
/// Entries are `(dx, dy, weight)`; a neighbour receives
/// `residual * weight / divisor`. Offsets are written for a left-to-right
/// row and mirrored horizontally on right-to-left rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// Human-readable name used in logs.
    pub name: &'static str,

    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = ahead in a left-to-right row)
    /// - `dy`: rows below the current one
    /// - `weight`: numerator over `divisor`
    pub entries: &'static [(i32, i32, u8)],

    /// Common denominator of all weights.
    pub divisor: u8,

    /// Largest `dy` among the entries.
    pub max_dy: usize,
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    name: "floyd_steinberg",
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke dithering kernel.
///
/// Twelve neighbours over three rows; smoother gradients than
/// Floyd-Steinberg at roughly three times the work per pixel.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    name: "jarvis_judice_ninke",
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

impl Kernel {
    /// Effective `(dx, dy, fraction)` for a row scanned in the given
    /// direction.
    #[inline]
    pub fn offsets(&self, reverse: bool) -> impl Iterator<Item = (i32, usize, f32)> + '_ {
        let divisor = self.divisor as f32;
        self.entries.iter().map(move |&(dx, dy, weight)| {
            let effective_dx = if reverse { -dx } else { dx };
            (effective_dx, dy as usize, weight as f32 / divisor)
        })
    }

    /// Whether every entry points at a pixel visited after the current one.
    pub fn is_causal(&self) -> bool {
        self.divisor > 0
            && self
                .entries
                .iter()
                .all(|&(dx, dy, _)| dy > 0 || (dy == 0 && dx > 0))
            && self.entries.iter().all(|&(_, dy, _)| dy as usize <= self.max_dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_full_propagation() {
        let sum: u32 = FLOYD_STEINBERG.entries.iter().map(|&(_, _, w)| w as u32).sum();
        assert_eq!(sum, FLOYD_STEINBERG.divisor as u32);
    }

    #[test]
    fn test_jjn_full_propagation() {
        let sum: u32 = JARVIS_JUDICE_NINKE
            .entries
            .iter()
            .map(|&(_, _, w)| w as u32)
            .sum();
        assert_eq!(sum, 48);
        assert_eq!(JARVIS_JUDICE_NINKE.entries.len(), 12);
    }

    #[test]
    fn test_jjn_layout() {
        let expected: [(i32, i32, u8); 12] = [
            (1, 0, 7),
            (2, 0, 5),
            (-2, 1, 3),
            (-1, 1, 5),
            (0, 1, 7),
            (1, 1, 5),
            (2, 1, 3),
            (-2, 2, 1),
            (-1, 2, 3),
            (0, 2, 5),
            (1, 2, 3),
            (2, 2, 1),
        ];
        assert_eq!(JARVIS_JUDICE_NINKE.entries, &expected[..]);
        assert_eq!(JARVIS_JUDICE_NINKE.divisor, 48);
    }

    #[test]
    fn test_floyd_steinberg_layout() {
        assert_eq!(
            FLOYD_STEINBERG.entries,
            &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)][..]
        );
    }

    #[test]
    fn test_max_dy_matches_entries() {
        for kernel in [FLOYD_STEINBERG, JARVIS_JUDICE_NINKE] {
            let max = kernel.entries.iter().map(|&(_, dy, _)| dy as usize).max();
            assert_eq!(max, Some(kernel.max_dy), "{}", kernel.name);
            assert!(kernel.is_causal(), "{}", kernel.name);
        }
    }

    #[test]
    fn test_offsets_mirror_on_reverse_rows() {
        let forward: Vec<_> = FLOYD_STEINBERG.offsets(false).collect();
        let reverse: Vec<_> = FLOYD_STEINBERG.offsets(true).collect();
        assert_eq!(forward[0], (1, 0, 7.0 / 16.0));
        assert_eq!(reverse[0], (-1, 0, 7.0 / 16.0));
        for (f, r) in forward.iter().zip(&reverse) {
            assert_eq!(f.0, -r.0);
            assert_eq!(f.1, r.1);
            assert_eq!(f.2, r.2);
        }
    }

    #[test]
    fn test_non_causal_kernel_detected() {
        const BACKWARDS: Kernel = Kernel {
            name: "backwards",
            entries: &[(-1, 0, 1)],
            divisor: 1,
            max_dy: 0,
        };
        assert!(!BACKWARDS.is_causal());
    }
}
