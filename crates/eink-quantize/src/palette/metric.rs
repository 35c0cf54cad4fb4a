//! Perceptual color difference (Delta E) in L\*a\*b\* space.

use std::fmt;
use std::str::FromStr;

use crate::api::UnknownVariant;
use crate::color::Lab;

/// Distance metric for palette color matching.
///
/// Both metrics are pure functions of two L\*a\*b\* triples and return a
/// non-squared distance, so values from either metric can be compared
/// against each other and against thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMetric {
    /// CIE76: Euclidean distance `sqrt(dL² + da² + db²)`.
    Cie76,

    /// Simplified CIEDE2000-like metric.
    ///
    /// Splits the a/b difference into a chroma component `dC = C2 - C1` and
    /// the orthogonal hue component `dH = sqrt(max(0, da² + db² - dC²))`,
    /// then combines them with unit weights: `sqrt(dL² + dC² + dH²)`.
    ///
    /// This omits the hue rotation term, the neutral-color compensation and
    /// the S_L/S_C/S_H weighting functions of the published standard. Do not
    /// replace it with the full formula: doing so changes nearest-color
    /// decisions and therefore every dithered output.
    #[default]
    Ciede2000Simplified,
}

impl DistanceMetric {
    /// Distance between two colors under this metric.
    #[inline]
    pub fn distance(self, a: Lab, b: Lab) -> f64 {
        match self {
            DistanceMetric::Cie76 => delta_e_cie76(a, b),
            DistanceMetric::Ciede2000Simplified => delta_e_ciede2000_simplified(a, b),
        }
    }

    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Cie76 => "cie76",
            DistanceMetric::Ciede2000Simplified => "ciede2000",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cie76" | "euclidean" => Ok(DistanceMetric::Cie76),
            "ciede2000" | "ciede2000_simplified" => Ok(DistanceMetric::Ciede2000Simplified),
            _ => Err(UnknownVariant::new("distance metric", s)),
        }
    }
}

/// CIE76 color difference.
#[inline]
pub fn delta_e_cie76(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab2.l - lab1.l;
    let da = lab2.a - lab1.a;
    let db = lab2.b - lab1.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Simplified CIEDE2000-like color difference (unit weights, no rotation term).
#[inline]
pub fn delta_e_ciede2000_simplified(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.chroma();
    let c2 = lab2.chroma();

    let dl = lab2.l - lab1.l;
    let dc = c2 - c1;
    let da = lab2.a - lab1.a;
    let db = lab2.b - lab1.b;

    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    (dl * dl + dc * dc + dh * dh).sqrt()
}
