//! Ground-truth benchmark regions.
//!
//! A benchmark is nothing more than the pair the engine consumes at setup:
//! per-dimension domains plus the true constraint set describing the region
//! the sampled points are labeled against.

use crate::geometry::{Constraint, Domain};

/// Ground truth for one optimization run: variable bounds and the true
/// constraint set of the region to be learned.
///
/// # Examples
///
/// ```
/// use constraint_es::benchmark::Benchmark;
///
/// let b = Benchmark::ball(2, 2.0, 3.0);
/// assert_eq!(b.domains.len(), 2);
/// assert_eq!(b.constraints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Benchmark {
    /// Per-dimension bounds of the search box.
    pub domains: Vec<Domain>,
    /// True constraints of the region.
    pub constraints: Vec<Constraint>,
}

impl Benchmark {
    /// A ball of radius `radius` centered at the origin, inside a symmetric
    /// box `[-bound, bound]` per dimension.
    pub fn ball(dimensions: usize, radius: f64, bound: f64) -> Self {
        Self {
            domains: vec![Domain::new(-bound, bound); dimensions],
            constraints: vec![Constraint::ball(vec![1.0; dimensions], radius * radius)],
        }
    }

    /// The half-space `Σ x_i ≤ limit` inside a symmetric box.
    pub fn halfspace(dimensions: usize, limit: f64, bound: f64) -> Self {
        Self {
            domains: vec![Domain::new(-bound, bound); dimensions],
            constraints: vec![Constraint::linear(vec![1.0; dimensions], limit)],
        }
    }

    /// An axis-aligned cube `x_i ≤ side` for every dimension, inside a
    /// symmetric box. One linear constraint per dimension.
    pub fn cube(dimensions: usize, side: f64, bound: f64) -> Self {
        let constraints = (0..dimensions)
            .map(|i| {
                let mut coeffs = vec![0.0; dimensions];
                coeffs[i] = 1.0;
                Constraint::linear(coeffs, side)
            })
            .collect();
        Self {
            domains: vec![Domain::new(-bound, bound); dimensions],
            constraints,
        }
    }

    /// Problem dimensionality.
    pub fn dimensions(&self) -> usize {
        self.domains.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::satisfies_all;

    #[test]
    fn test_ball_membership() {
        let b = Benchmark::ball(3, 1.0, 2.0);
        assert!(satisfies_all(&[0.5, 0.5, 0.5], &b.constraints));
        assert!(!satisfies_all(&[1.0, 1.0, 0.0], &b.constraints));
    }

    #[test]
    fn test_halfspace_membership() {
        let b = Benchmark::halfspace(2, 1.0, 5.0);
        assert!(satisfies_all(&[0.4, 0.4], &b.constraints));
        assert!(!satisfies_all(&[1.0, 1.0], &b.constraints));
    }

    #[test]
    fn test_cube_one_constraint_per_dimension() {
        let b = Benchmark::cube(4, 1.0, 3.0);
        assert_eq!(b.constraints.len(), 4);
        assert!(satisfies_all(&[0.9, 0.9, 0.9, 0.9], &b.constraints));
        assert!(!satisfies_all(&[0.0, 1.5, 0.0, 0.0], &b.constraints));
    }
}
