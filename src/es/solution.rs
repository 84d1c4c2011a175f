//! The ES genome.

use super::config::EsConfig;
use super::mutation::MutationVariant;
use rand::Rng;
use std::cmp::Ordering;
use std::f64::consts::PI;

/// A candidate solution: flattened constraint coefficients plus the
/// self-adaptive strategy parameters that mutate them.
///
/// Layout of `object_coefficients`: one contiguous block of
/// `dimensions + 1` values per constraint — `dimensions` linear coefficients
/// followed by the limiting value.
///
/// `step_sizes` holds a single global σ (one-step mutation) or one σ per
/// object coefficient (n-step and correlated). `rotation_angles` is empty
/// except under correlated mutation, where it holds
/// `dimensions·(dimensions−1)/2` pairwise angles in `(−π, π]`.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Flattened constraint coefficients and limiting values.
    pub object_coefficients: Vec<f64>,
    /// Self-adaptive mutation strengths.
    pub step_sizes: Vec<f64>,
    /// Pairwise rotation angles (correlated mutation only).
    pub rotation_angles: Vec<f64>,
    fitness: f64,
}

impl Solution {
    /// Creates an unevaluated solution from its parts.
    pub fn new(
        object_coefficients: Vec<f64>,
        step_sizes: Vec<f64>,
        rotation_angles: Vec<f64>,
    ) -> Self {
        Self {
            object_coefficients,
            step_sizes,
            rotation_angles,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a random solution with the vector shapes the configured
    /// mutation variant expects.
    ///
    /// Object coefficients are uniform in
    /// `[-coefficient_init_range, coefficient_init_range]`, step sizes start
    /// at `initial_step_size`, rotation angles are uniform in `(−π, π]`.
    pub fn random<R: Rng>(config: &EsConfig, rng: &mut R) -> Self {
        let n = config.genome_length();
        let range = config.coefficient_init_range;
        let object_coefficients = (0..n).map(|_| rng.random_range(-range..=range)).collect();

        let step_sizes = match config.mutation {
            MutationVariant::UncorrelatedOneStep => vec![config.initial_step_size],
            MutationVariant::UncorrelatedNSteps | MutationVariant::Correlated => {
                vec![config.initial_step_size; n]
            }
        };

        let rotation_angles = match config.mutation {
            MutationVariant::Correlated => (0..config.rotation_angle_count())
                // negating the half-open draw [-π, π) lands in (−π, π]
                .map(|_| -rng.random_range(-PI..PI))
                .collect(),
            _ => Vec::new(),
        };

        Self::new(object_coefficients, step_sizes, rotation_angles)
    }

    /// Current fitness; `f64::INFINITY` until evaluated. Lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores an evaluation result.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Marks the solution as needing re-evaluation.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = f64::INFINITY;
    }

    /// Total order by fitness, ascending (best first).
    ///
    /// Uses `f64::total_cmp`, so the sort is total and never panics;
    /// equal-fitness ties resolve deterministically.
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}
