//! Self-adaptive mutation operators.
//!
//! All three variants mutate the strategy parameters first, then perturb the
//! object coefficients with the *updated* strengths — the textbook ES
//! ordering that lets good step sizes hitchhike with good solutions.
//!
//! # Variants
//!
//! - [`MutationVariant::UncorrelatedOneStep`]: one global σ,
//!   `σ' = σ·exp(τ₀·N)`, `τ₀ = 1/√n`
//! - [`MutationVariant::UncorrelatedNSteps`]: per-coefficient σᵢ,
//!   `σ'ᵢ = σᵢ·exp(τ'·N + τ·Nᵢ)`, `τ' = 1/√(2n)`, `τ = 1/√(2√n)`
//! - [`MutationVariant::Correlated`]: n-step plus pairwise rotation angles
//!   `β'ⱼ = βⱼ + β_rate·N`, wrapped into `(−π, π]`; the perturbation vector
//!   is rotated before being added
//!
//! # References
//!
//! - Schwefel (1995), *Evolution and Optimum Seeking*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.4

use super::config::EsConfig;
use super::solution::Solution;
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::{PI, TAU};

/// Self-adaptive mutation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationVariant {
    /// A single global step size for all coefficients.
    UncorrelatedOneStep,
    /// One independent step size per coefficient.
    UncorrelatedNSteps,
    /// N-step plus learned pairwise rotation angles.
    Correlated,
}

/// Applies the configured self-adaptive mutation to one solution.
///
/// A mutator is built once per run from the config; learning rates are
/// derived from the genome length `n` at construction. Mutation reads and
/// writes only the solution it is handed — never a sibling.
#[derive(Debug, Clone)]
pub struct Mutator {
    variant: MutationVariant,
    dimensions: usize,
    min_step_size: f64,
    angle_mutation_rate: f64,
    /// τ₀ = 1/√n (one-step).
    tau_global: f64,
    /// τ' = 1/√(2n) (n-step shared term).
    tau_prime: f64,
    /// τ = 1/√(2√n) (n-step local term).
    tau_local: f64,
}

impl Mutator {
    /// Builds a mutator for `config`, deriving the canonical learning rates
    /// from the genome length.
    pub fn new(config: &EsConfig) -> Self {
        let n = config.genome_length() as f64;
        Self {
            variant: config.mutation,
            dimensions: config.dimensions,
            min_step_size: config.min_step_size,
            angle_mutation_rate: config.angle_mutation_rate,
            tau_global: 1.0 / n.sqrt(),
            tau_prime: 1.0 / (2.0 * n).sqrt(),
            tau_local: 1.0 / (2.0 * n.sqrt()).sqrt(),
        }
    }

    /// Mutates `solution` in place and invalidates its fitness.
    ///
    /// # Panics
    /// Panics if the solution's strategy vectors do not have the shape the
    /// variant requires — a construction bug, not a runtime condition.
    pub fn mutate<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        match self.variant {
            MutationVariant::UncorrelatedOneStep => self.mutate_one_step(solution, rng),
            MutationVariant::UncorrelatedNSteps => self.mutate_n_steps(solution, rng),
            MutationVariant::Correlated => self.mutate_correlated(solution, rng),
        }
        solution.invalidate_fitness();
    }

    fn mutate_one_step<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        assert_eq!(
            solution.step_sizes.len(),
            1,
            "one-step mutation expects a single step size"
        );
        let draw: f64 = rng.sample(StandardNormal);
        let sigma = (solution.step_sizes[0] * (self.tau_global * draw).exp())
            .max(self.min_step_size);
        solution.step_sizes[0] = sigma;
        for coeff in &mut solution.object_coefficients {
            let n: f64 = rng.sample(StandardNormal);
            *coeff += n * sigma;
        }
    }

    fn mutate_n_steps<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        self.update_step_sizes(solution, rng);
        for i in 0..solution.object_coefficients.len() {
            let n: f64 = rng.sample(StandardNormal);
            solution.object_coefficients[i] += n * solution.step_sizes[i];
        }
    }

    fn mutate_correlated<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        self.update_step_sizes(solution, rng);

        let expected_angles = self.dimensions * (self.dimensions - 1) / 2;
        assert_eq!(
            solution.rotation_angles.len(),
            expected_angles,
            "correlated mutation expects {expected_angles} rotation angles"
        );
        for angle in &mut solution.rotation_angles {
            let n: f64 = rng.sample(StandardNormal);
            *angle = wrap_angle(*angle + self.angle_mutation_rate * n);
        }

        // Draw the full perturbation vector, then rotate the geometric part
        // of each constraint block before adding it.
        let mut delta: Vec<f64> = solution
            .step_sizes
            .iter()
            .map(|&sigma| {
                let n: f64 = rng.sample(StandardNormal);
                n * sigma
            })
            .collect();
        for block in delta.chunks_mut(self.dimensions + 1) {
            rotate_in_place(&mut block[..self.dimensions], &solution.rotation_angles);
        }
        for (coeff, d) in solution.object_coefficients.iter_mut().zip(&delta) {
            *coeff += d;
        }
    }

    /// Shared n-step lognormal update: one global draw plus one local draw
    /// per coefficient, clamped to the floor.
    fn update_step_sizes<R: Rng>(&self, solution: &mut Solution, rng: &mut R) {
        assert_eq!(
            solution.step_sizes.len(),
            solution.object_coefficients.len(),
            "n-step mutation expects one step size per object coefficient"
        );
        let shared: f64 = rng.sample(StandardNormal);
        for sigma in &mut solution.step_sizes {
            let local: f64 = rng.sample(StandardNormal);
            *sigma = (*sigma * (self.tau_prime * shared + self.tau_local * local).exp())
                .max(self.min_step_size);
        }
    }
}

/// Normalizes an angle into `(−π, π]` by adding or subtracting `2π`.
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle;
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

/// Applies the canonical pairwise rotation sequence
/// `(1,2),(1,3),…,(1,d),(2,3),…,(d−1,d)` to `vector`, successively.
///
/// The angle order must match the sequence; any other order changes the
/// effective mutation distribution.
pub(crate) fn rotate_in_place(vector: &mut [f64], angles: &[f64]) {
    let d = vector.len();
    debug_assert_eq!(angles.len(), d * (d - 1) / 2);
    let mut k = 0;
    for p in 0..d.saturating_sub(1) {
        for q in (p + 1)..d {
            let (sin, cos) = angles[k].sin_cos();
            k += 1;
            let vp = vector[p];
            let vq = vector[q];
            vector[p] = vp * cos - vq * sin;
            vector[q] = vp * sin + vq * cos;
        }
    }
}
