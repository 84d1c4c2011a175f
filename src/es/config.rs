//! ES configuration.
//!
//! [`EsConfig`] holds all parameters that control one optimization run.

use super::mutation::MutationVariant;
use super::recombination::RecombinationConfig;
use super::selection::{ParentSelection, SurvivorStrategy};
use super::supervisor::OneFifthRule;

/// Configuration for one Evolution Strategy run.
///
/// Controls the problem shape (dimensions, constraint count), the mutation
/// and recombination variants, population sizes, numeric tuning constants,
/// and termination conditions.
///
/// # Defaults
///
/// ```
/// use constraint_es::es::EsConfig;
///
/// let config = EsConfig::new(2, 1);
/// assert_eq!(config.base_population_size, 30);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use constraint_es::es::{EsConfig, MutationVariant, RecombinationConfig};
///
/// let config = EsConfig::new(2, 1)
///     .with_mutation(MutationVariant::Correlated)
///     .with_recombination(RecombinationConfig::default())
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EsConfig {
    /// Problem dimensionality (coordinates per sample point).
    pub dimensions: usize,

    /// Number of constraints each genome encodes.
    pub constraint_count: usize,

    /// Self-adaptive mutation variant.
    pub mutation: MutationVariant,

    /// Recombination setup, or `None` to copy parents directly.
    pub recombination: Option<RecombinationConfig>,

    /// μ — number of solutions surviving each generation.
    pub base_population_size: usize,

    /// λ — number of offspring generated each generation.
    pub offspring_population_size: usize,

    /// Size of the mating pool drawn from the base population each
    /// generation (with replacement).
    pub mating_pool_size: usize,

    /// How parents are drawn into the mating pool.
    pub parent_selection: ParentSelection,

    /// Survivor pool: parents ∪ offspring (plus) or offspring only (comma).
    pub survivor_strategy: SurvivorStrategy,

    /// Initial σ for freshly generated solutions.
    pub initial_step_size: f64,

    /// Lower clamp for every step size, applied after every mutation.
    ///
    /// Prevents σ collapsing to zero, which would freeze the search.
    pub min_step_size: f64,

    /// β — standard deviation of the additive rotation-angle mutation.
    ///
    /// The canonical value is ≈5° (0.0873 rad).
    pub angle_mutation_rate: f64,

    /// Object coefficients initialize uniformly in `[-range, range]`.
    pub coefficient_init_range: f64,

    /// Fitness weight per misclassified sample point.
    pub misclassification_weight: f64,

    /// Fitness penalty per effective constraint, favoring compact sets.
    pub constraint_penalty: f64,

    /// Optional 1/5 success rule; `None` disables it.
    pub one_fifth_rule: Option<OneFifthRule>,

    /// Generation budget.
    pub max_generations: usize,

    /// Number of generations without best-so-far improvement before
    /// stopping. Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Mutation and recombination stay sequential either way, so a fixed
    /// seed yields identical runs with or without this flag.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl EsConfig {
    /// Creates a configuration for the given problem shape with default
    /// tuning: (30 + 200)-ES, uncorrelated n-step mutation, no
    /// recombination, plus-strategy survivors.
    pub fn new(dimensions: usize, constraint_count: usize) -> Self {
        Self {
            dimensions,
            constraint_count,
            mutation: MutationVariant::UncorrelatedNSteps,
            recombination: None,
            base_population_size: 30,
            offspring_population_size: 200,
            mating_pool_size: 200,
            parent_selection: ParentSelection::Uniform,
            survivor_strategy: SurvivorStrategy::Plus,
            initial_step_size: 1.0,
            min_step_size: 1e-6,
            angle_mutation_rate: 0.0873,
            coefficient_init_range: 5.0,
            misclassification_weight: 1.0,
            constraint_penalty: 0.05,
            one_fifth_rule: None,
            max_generations: 100,
            stagnation_limit: 25,
            parallel: false,
            seed: None,
        }
    }

    /// Length of the object-coefficient vector:
    /// `constraint_count × (dimensions + 1)`.
    pub fn genome_length(&self) -> usize {
        self.constraint_count * (self.dimensions + 1)
    }

    /// Number of pairwise rotation angles for correlated mutation:
    /// `dimensions·(dimensions−1)/2`.
    pub fn rotation_angle_count(&self) -> usize {
        self.dimensions * self.dimensions.saturating_sub(1) / 2
    }

    /// Sets the mutation variant.
    pub fn with_mutation(mut self, variant: MutationVariant) -> Self {
        self.mutation = variant;
        self
    }

    /// Enables recombination.
    pub fn with_recombination(mut self, recombination: RecombinationConfig) -> Self {
        self.recombination = Some(recombination);
        self
    }

    /// Disables recombination (offspring are parent copies).
    pub fn without_recombination(mut self) -> Self {
        self.recombination = None;
        self
    }

    /// Sets μ, the base population size.
    pub fn with_base_population_size(mut self, mu: usize) -> Self {
        self.base_population_size = mu;
        self
    }

    /// Sets λ, the offspring population size.
    pub fn with_offspring_population_size(mut self, lambda: usize) -> Self {
        self.offspring_population_size = lambda;
        self
    }

    /// Sets the mating pool size.
    pub fn with_mating_pool_size(mut self, size: usize) -> Self {
        self.mating_pool_size = size;
        self
    }

    /// Sets the parent selection strategy.
    pub fn with_parent_selection(mut self, selection: ParentSelection) -> Self {
        self.parent_selection = selection;
        self
    }

    /// Sets the survivor strategy.
    pub fn with_survivor_strategy(mut self, strategy: SurvivorStrategy) -> Self {
        self.survivor_strategy = strategy;
        self
    }

    /// Sets the initial step size.
    pub fn with_initial_step_size(mut self, sigma: f64) -> Self {
        self.initial_step_size = sigma;
        self
    }

    /// Sets the step-size floor.
    pub fn with_min_step_size(mut self, epsilon: f64) -> Self {
        self.min_step_size = epsilon;
        self
    }

    /// Sets the rotation-angle mutation rate.
    pub fn with_angle_mutation_rate(mut self, beta: f64) -> Self {
        self.angle_mutation_rate = beta;
        self
    }

    /// Sets the coefficient initialization range.
    pub fn with_coefficient_init_range(mut self, range: f64) -> Self {
        self.coefficient_init_range = range;
        self
    }

    /// Sets the fitness weight per misclassified point.
    pub fn with_misclassification_weight(mut self, weight: f64) -> Self {
        self.misclassification_weight = weight;
        self
    }

    /// Sets the per-constraint complexity penalty.
    pub fn with_constraint_penalty(mut self, penalty: f64) -> Self {
        self.constraint_penalty = penalty;
        self
    }

    /// Enables the 1/5 success rule.
    pub fn with_one_fifth_rule(mut self, rule: OneFifthRule) -> Self {
        self.one_fifth_rule = Some(rule);
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel offspring evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid. The
    /// runner treats an invalid configuration as fatal.
    pub fn validate(&self) -> Result<(), String> {
        if self.dimensions == 0 {
            return Err("dimensions must be at least 1".into());
        }
        if self.constraint_count == 0 {
            return Err("constraint_count must be at least 1".into());
        }
        if self.base_population_size < 2 {
            return Err("base_population_size must be at least 2".into());
        }
        if self.offspring_population_size == 0 {
            return Err("offspring_population_size must be at least 1".into());
        }
        if self.survivor_strategy == SurvivorStrategy::Comma
            && self.offspring_population_size < self.base_population_size
        {
            return Err(
                "comma strategy requires offspring_population_size >= base_population_size"
                    .into(),
            );
        }
        if self.mating_pool_size == 0 {
            return Err("mating_pool_size must be at least 1".into());
        }
        if let Some(rc) = &self.recombination {
            if !(rc.part_of_population > 0.0 && rc.part_of_population <= 1.0) {
                return Err("part_of_population must lie in (0, 1]".into());
            }
            if self.mating_pool_size < 2 {
                return Err("recombination requires a mating pool of at least 2".into());
            }
        }
        if !(self.min_step_size > 0.0) {
            return Err("min_step_size must be positive".into());
        }
        if self.initial_step_size < self.min_step_size {
            return Err("initial_step_size must be at least min_step_size".into());
        }
        if self.angle_mutation_rate < 0.0 {
            return Err("angle_mutation_rate must be non-negative".into());
        }
        if self.coefficient_init_range <= 0.0 {
            return Err("coefficient_init_range must be positive".into());
        }
        if self.misclassification_weight < 0.0 || self.constraint_penalty < 0.0 {
            return Err("fitness weights must be non-negative".into());
        }
        if let Some(rule) = &self.one_fifth_rule {
            if rule.window == 0 {
                return Err("one_fifth_rule window must be at least 1".into());
            }
            if !(rule.adjustment > 0.0 && rule.adjustment < 1.0) {
                return Err("one_fifth_rule adjustment must lie in (0, 1)".into());
            }
            if !(rule.target_ratio > 0.0 && rule.target_ratio < 1.0) {
                return Err("one_fifth_rule target_ratio must lie in (0, 1)".into());
            }
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        Ok(())
    }
}
