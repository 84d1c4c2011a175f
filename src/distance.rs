//! Pluggable point-to-point distance metrics.
//!
//! Used by the point generators (nearest-neighbour radii) and the
//! redundancy checks. All metrics assume vectors of equal length.

/// Distance metric between two coordinate vectors.
///
/// # Examples
///
/// ```
/// use constraint_es::distance::DistanceMetric;
///
/// let d = DistanceMetric::Euclidean.calculate(&[0.0, 0.0], &[3.0, 4.0]);
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceMetric {
    /// Canberra distance: `Σ |a_i − b_i| / (|a_i| + |b_i|)`.
    ///
    /// Terms with a zero denominator (both coordinates zero) contribute
    /// nothing instead of producing NaN.
    #[default]
    Canberra,
    /// Euclidean (L2) distance.
    Euclidean,
    /// Chebyshev (L∞) distance: the largest per-coordinate difference.
    Chebyshev,
}

impl DistanceMetric {
    /// Computes the distance between `a` and `b`.
    ///
    /// # Panics
    /// Panics if the vectors have different lengths.
    pub fn calculate(&self, a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(
            a.len(),
            b.len(),
            "distance operands must have equal length ({} vs {})",
            a.len(),
            b.len()
        );
        match self {
            DistanceMetric::Canberra => a
                .iter()
                .zip(b)
                .map(|(x, y)| {
                    let denom = x.abs() + y.abs();
                    if denom == 0.0 {
                        0.0
                    } else {
                        (x - y).abs() / denom
                    }
                })
                .sum(),
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
        }
    }
}
