//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs from the IEC 61966-2-1
//! decoding formula, one entry per 8-bit code value.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel to linear light (0.0..=1.0).
#[inline]
pub fn srgb_to_linear(value: u8) -> f64 {
    SRGB_TO_LINEAR[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(value: u8) -> f64 {
        let c = value as f64 / 255.0;
        if c > 0.04045 {
            ((c + 0.055) / 1.055).powf(2.4)
        } else {
            c / 12.92
        }
    }

    #[test]
    fn test_table_matches_formula_bit_for_bit() {
        for v in 0..=255u8 {
            assert_eq!(srgb_to_linear(v), exact(v), "mismatch at {v}");
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonicity() {
        for v in 1..=255u8 {
            assert!(
                srgb_to_linear(v) > srgb_to_linear(v - 1),
                "srgb_to_linear not monotonic at {v}"
            );
        }
    }
}
