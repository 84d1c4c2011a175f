//! Fitness evaluation: decode a genome, score it against the sample points.

use super::config::EsConfig;
use super::solution::Solution;
use crate::geometry::{satisfies_all, Constraint, Point};

/// Scores candidate constraint sets against fixed positive/negative point
/// sets.
///
/// The evaluator owns an immutable snapshot of both point sets for the
/// run's duration; evaluation never mutates them, only the fitness field of
/// the solution being scored. A positive point is correctly handled when it
/// satisfies *all* decoded constraints; a negative point when it violates
/// at least one.
///
/// Fitness (lower = better):
///
/// ```text
/// misclassification_weight × misclassified
///   + constraint_penalty × effective constraints
/// ```
///
/// Both terms are monotone: an extra misclassified point or an extra
/// effective constraint never lowers fitness.
#[derive(Debug, Clone)]
pub struct Evaluator {
    positives: Vec<Point>,
    negatives: Vec<Point>,
    dimensions: usize,
    constraint_count: usize,
    misclassification_weight: f64,
    constraint_penalty: f64,
}

impl Evaluator {
    /// Builds an evaluator over the given point sets with the config's
    /// problem shape and fitness weights.
    ///
    /// # Panics
    /// Panics if any point's dimensionality differs from the config's.
    pub fn new(positives: Vec<Point>, negatives: Vec<Point>, config: &EsConfig) -> Self {
        for p in positives.iter().chain(&negatives) {
            assert_eq!(
                p.dimensions(),
                config.dimensions,
                "sample point dimensionality {} does not match configured {}",
                p.dimensions(),
                config.dimensions
            );
        }
        Self {
            positives,
            negatives,
            dimensions: config.dimensions,
            constraint_count: config.constraint_count,
            misclassification_weight: config.misclassification_weight,
            constraint_penalty: config.constraint_penalty,
        }
    }

    /// The positive (inside) sample points.
    pub fn positives(&self) -> &[Point] {
        &self.positives
    }

    /// The negative (outside) sample points.
    pub fn negatives(&self) -> &[Point] {
        &self.negatives
    }

    /// Decodes a genome into its linear constraint set: contiguous blocks of
    /// `dimensions` coefficients followed by one limiting value.
    ///
    /// # Panics
    /// Panics if the genome length does not match the configured shape.
    pub fn decode(&self, solution: &Solution) -> Vec<Constraint> {
        let block = self.dimensions + 1;
        assert_eq!(
            solution.object_coefficients.len(),
            self.constraint_count * block,
            "genome length {} does not match {} constraints of {} dimensions",
            solution.object_coefficients.len(),
            self.constraint_count,
            self.dimensions
        );
        solution
            .object_coefficients
            .chunks_exact(block)
            .map(|chunk| Constraint::linear(chunk[..self.dimensions].to_vec(), chunk[self.dimensions]))
            .collect()
    }

    /// Number of sample points (either label) the constraint set
    /// misclassifies.
    pub fn misclassification_count(&self, constraints: &[Constraint]) -> usize {
        let wrong_positives = self
            .positives
            .iter()
            .filter(|p| !satisfies_all(&p.coordinates, constraints))
            .count();
        let wrong_negatives = self
            .negatives
            .iter()
            .filter(|p| satisfies_all(&p.coordinates, constraints))
            .count();
        wrong_positives + wrong_negatives
    }

    /// Evaluates `solution`, stores the score on its fitness field, and
    /// returns it.
    pub fn evaluate(&self, solution: &mut Solution) -> f64 {
        let constraints = self.decode(solution);
        let misclassified = self.misclassification_count(&constraints);
        let effective = constraints.iter().filter(|c| c.is_effective()).count();
        let fitness = self.misclassification_weight * misclassified as f64
            + self.constraint_penalty * effective as f64;
        solution.set_fitness(fitness);
        fitness
    }
}
