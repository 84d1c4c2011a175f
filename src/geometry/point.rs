//! Sample points used for fitness evaluation.

/// A labeled sample point in problem space.
///
/// Beyond its coordinates a point carries the distance to its nearest
/// neighbour within its own set. The value is filled in once for the
/// positive set (see [`crate::sampling`]) and only read afterwards — the
/// negative generator uses it as the exclusion radius around each positive
/// point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Position, one entry per problem dimension.
    pub coordinates: Vec<f64>,
    /// Distance to the nearest neighbour in the point's own set.
    ///
    /// `f64::INFINITY` until computed (or for a singleton set).
    pub nearest_neighbour_distance: f64,
}

impl Point {
    /// Creates a point with an uncomputed neighbour distance.
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self {
            coordinates,
            nearest_neighbour_distance: f64::INFINITY,
        }
    }

    /// Problem dimensionality of this point.
    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }
}
