//! Post-hoc removal of redundant constraints.
//!
//! After a run, the best genome often carries constraints that are never
//! the binding one anywhere in the domain box — removing them leaves the
//! feasible region unchanged. The remover detects this by domain-space
//! sampling, so the result is deterministic only up to the random seed.

use crate::geometry::{Constraint, Domain, Point};
use rand::Rng;

/// Drops constraints that are never binding for any sampled domain point.
///
/// A constraint is kept when some probe point — a uniform domain sample or
/// one of the guard points — satisfies every *other* kept constraint while
/// violating it; such a point proves the constraint shapes the feasible
/// region. Guard points (typically the run's positive/negative sample sets)
/// make the check conservative: removal never flips the classification of
/// any point that fitness evaluation saw.
///
/// # Examples
///
/// ```
/// use constraint_es::geometry::{Constraint, Domain};
/// use constraint_es::reduction::RedundancyRemover;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let constraints = vec![
///     Constraint::linear(vec![1.0, 0.0], 1.0),
///     Constraint::linear(vec![1.0, 0.0], 10.0), // implied by the first
/// ];
/// let domains = vec![Domain::new(-3.0, 3.0), Domain::new(-3.0, 3.0)];
/// let mut rng = StdRng::seed_from_u64(7);
/// let reduced = RedundancyRemover::new(2000).remove(&constraints, &domains, &[], &mut rng);
/// assert_eq!(reduced.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RedundancyRemover {
    samples: usize,
}

impl Default for RedundancyRemover {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl RedundancyRemover {
    /// Creates a remover drawing `samples` uniform probes from the domain
    /// box.
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    /// Returns the subset of `constraints` that still shapes the feasible
    /// region, preserving order.
    pub fn remove<R: Rng>(
        &self,
        constraints: &[Constraint],
        domains: &[Domain],
        guard_points: &[Point],
        rng: &mut R,
    ) -> Vec<Constraint> {
        let mut probes: Vec<Vec<f64>> = (0..self.samples)
            .map(|_| {
                domains
                    .iter()
                    .map(|d| {
                        if d.width() == 0.0 {
                            d.lower()
                        } else {
                            rng.random_range(d.lower()..=d.upper())
                        }
                    })
                    .collect()
            })
            .collect();
        probes.extend(guard_points.iter().map(|p| p.coordinates.clone()));

        let mut kept: Vec<Constraint> = constraints.to_vec();
        let mut i = 0;
        while i < kept.len() {
            if self.is_binding(&kept, i, &probes) {
                i += 1;
            } else {
                kept.remove(i);
            }
        }
        kept
    }

    /// Whether some probe satisfies every kept constraint except `index`
    /// while violating `index` — the witness that the constraint matters.
    fn is_binding(&self, kept: &[Constraint], index: usize, probes: &[Vec<f64>]) -> bool {
        probes.iter().any(|p| {
            !kept[index].is_satisfied(p)
                && kept
                    .iter()
                    .enumerate()
                    .all(|(j, c)| j == index || c.is_satisfied(p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn domains(bound: f64) -> Vec<Domain> {
        vec![Domain::new(-bound, bound); 2]
    }

    #[test]
    fn test_implied_halfspace_is_removed() {
        let constraints = vec![
            Constraint::linear(vec![1.0, 1.0], 1.0),
            Constraint::linear(vec![1.0, 1.0], 5.0),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let reduced =
            RedundancyRemover::new(2000).remove(&constraints, &domains(3.0), &[], &mut rng);
        assert_eq!(reduced, vec![Constraint::linear(vec![1.0, 1.0], 1.0)]);
    }

    #[test]
    fn test_independent_constraints_survive() {
        let constraints = vec![
            Constraint::linear(vec![1.0, 0.0], 1.0),
            Constraint::linear(vec![0.0, 1.0], 1.0),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let reduced =
            RedundancyRemover::new(2000).remove(&constraints, &domains(3.0), &[], &mut rng);
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn test_ball_inside_halfspace_removes_halfspace() {
        // The unit ball lies entirely within x <= 5 over this box.
        let constraints = vec![
            Constraint::ball(vec![1.0, 1.0], 1.0),
            Constraint::linear(vec![1.0, 0.0], 5.0),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let reduced =
            RedundancyRemover::new(2000).remove(&constraints, &domains(3.0), &[], &mut rng);
        assert_eq!(reduced, vec![Constraint::ball(vec![1.0, 1.0], 1.0)]);
    }

    #[test]
    fn test_never_binding_vacuous_constraint_is_removed() {
        // All-zero coefficients with a non-negative limit hold everywhere.
        let constraints = vec![
            Constraint::linear(vec![0.0, 0.0], 1.0),
            Constraint::linear(vec![1.0, 0.0], 0.5),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let reduced =
            RedundancyRemover::new(2000).remove(&constraints, &domains(3.0), &[], &mut rng);
        assert_eq!(reduced, vec![Constraint::linear(vec![1.0, 0.0], 0.5)]);
    }

    #[test]
    fn test_reduction_preserves_guard_point_classification() {
        use crate::geometry::satisfies_all;

        let constraints = vec![
            Constraint::linear(vec![1.0, 0.0], 1.0),
            Constraint::linear(vec![0.0, 1.0], 1.0),
            Constraint::linear(vec![1.0, 1.0], 2.5), // implied over the box
        ];
        let guards: Vec<Point> = [
            [0.5, 0.5],
            [1.5, 0.0],
            [0.0, 1.5],
            [-2.0, -2.0],
            [0.9, 0.9],
        ]
        .iter()
        .map(|c| Point::new(c.to_vec()))
        .collect();

        let mut rng = StdRng::seed_from_u64(42);
        let reduced =
            RedundancyRemover::new(2000).remove(&constraints, &domains(3.0), &guards, &mut rng);
        for g in &guards {
            assert_eq!(
                satisfies_all(&g.coordinates, &constraints),
                satisfies_all(&g.coordinates, &reduced),
                "classification changed for {:?}",
                g.coordinates
            );
        }
    }

    #[test]
    fn test_guard_point_can_rescue_a_constraint() {
        // Over a tiny box around the origin, x <= 1 is never violated by
        // domain samples, but a guard point outside the box still needs it.
        let constraints = vec![Constraint::linear(vec![1.0, 0.0], 1.0)];
        let tiny = vec![Domain::new(-0.1, 0.1); 2];
        let guard = vec![Point::new(vec![2.0, 0.0])];
        let mut rng = StdRng::seed_from_u64(42);

        let without_guard =
            RedundancyRemover::new(500).remove(&constraints, &tiny, &[], &mut rng);
        assert!(without_guard.is_empty());

        let with_guard =
            RedundancyRemover::new(500).remove(&constraints, &tiny, &guard, &mut rng);
        assert_eq!(with_guard.len(), 1);
    }

    #[test]
    fn test_reduction_never_worsens_misclassification() {
        use crate::benchmark::Benchmark;
        use crate::distance::DistanceMetric;
        use crate::es::{EsConfig, Evaluator};
        use crate::sampling::{generate_negative_points, generate_positive_points};

        let benchmark = Benchmark::ball(2, 2.0, 4.0);
        let mut rng = StdRng::seed_from_u64(11);
        let metric = DistanceMetric::Euclidean;
        let positives =
            generate_positive_points(&benchmark, 30, 1_000_000, metric, &mut rng).unwrap();
        let negatives = generate_negative_points(
            &benchmark, &positives, 30, 4.0, 1_000_000, metric, &mut rng,
        )
        .unwrap();
        let config = EsConfig::new(2, 3);
        let evaluator = Evaluator::new(positives.clone(), negatives.clone(), &config);

        // A box-ish constraint set with one clearly implied member.
        let constraints = vec![
            Constraint::linear(vec![1.0, 0.0], 2.0),
            Constraint::linear(vec![-1.0, 0.0], 2.0),
            Constraint::linear(vec![1.0, 1.0], 50.0),
        ];
        let before = evaluator.misclassification_count(&constraints);

        let mut guards = positives;
        guards.extend(negatives);
        let reduced = RedundancyRemover::new(2000).remove(
            &constraints,
            &benchmark.domains,
            &guards,
            &mut rng,
        );
        let after = evaluator.misclassification_count(&reduced);
        assert!(reduced.len() < constraints.len());
        assert!(
            after <= before,
            "reduction raised misclassifications from {before} to {after}"
        );
    }

    #[test]
    fn test_deterministic_given_seed() {
        let constraints = vec![
            Constraint::linear(vec![1.0, 1.0], 1.0),
            Constraint::ball(vec![1.0, 1.0], 4.0),
        ];
        let run = || {
            let mut rng = StdRng::seed_from_u64(9);
            RedundancyRemover::new(1000).remove(&constraints, &domains(3.0), &[], &mut rng)
        };
        assert_eq!(run(), run());
    }
}
