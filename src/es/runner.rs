//! ES generation-loop execution.
//!
//! [`EsRunner`] orchestrates the complete loop:
//! initialization → parent selection → (recombination) → mutation +
//! supervision → evaluation → survivor selection → repeat.

use super::config::EsConfig;
use super::evaluator::Evaluator;
use super::mutation::Mutator;
use super::recombination::{recombine, sample_distinct_parents};
use super::selection::select_survivors;
use super::solution::Solution;
use super::supervisor::RuleSupervisor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Result of one ES optimization run.
#[derive(Debug, Clone)]
pub struct EsResult {
    /// The best solution found during the entire run.
    pub best: Solution,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Best-so-far fitness at initialization and after each generation.
    ///
    /// Monotone non-increasing: the best-so-far never worsens, even under
    /// the comma strategy where the population best can.
    pub fitness_history: Vec<f64>,
}

/// Executes the ES generation loop.
///
/// One loop serves all four engine variants; the config decides which
/// mutation and recombination operators are wired in.
///
/// # Usage
///
/// ```ignore
/// let evaluator = Evaluator::new(positives, negatives, &config);
/// let result = EsRunner::run(&evaluator, &config);
/// let constraints = evaluator.decode(&result.best);
/// ```
pub struct EsRunner;

impl EsRunner {
    /// Runs the optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`EsConfig::validate`]
    /// first to get a descriptive error).
    pub fn run(evaluator: &Evaluator, config: &EsConfig) -> EsResult {
        Self::run_with_observer(evaluator, config, |_, _| {})
    }

    /// Runs the optimization, invoking `observer(generation, best_fitness)`
    /// after every generation.
    pub fn run_with_observer(
        evaluator: &Evaluator,
        config: &EsConfig,
        mut observer: impl FnMut(usize, f64),
    ) -> EsResult {
        config.validate().expect("invalid EsConfig");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mutator = Mutator::new(config);
        let mut supervisor = RuleSupervisor::new(config);

        // 1. Initialize and evaluate the base population.
        let mut base: Vec<Solution> = (0..config.base_population_size)
            .map(|_| Solution::random(config, &mut rng))
            .collect();
        evaluate_population(evaluator, &mut base, config.parallel);

        let mut best = find_best(&base).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness());

        let mut stagnation_counter = 0usize;

        // 2. Generation loop.
        for gen in 0..config.max_generations {
            // Mating pool: with-replacement draws from the base population.
            let pool: Vec<usize> = (0..config.mating_pool_size)
                .map(|_| config.parent_selection.select(&base, &mut rng))
                .collect();

            let mut offspring = Self::produce_offspring(&base, &pool, config, &mut rng);

            // Mutation and supervision, each offspring independently.
            supervisor.begin_generation();
            for child in &mut offspring {
                mutator.mutate(child, &mut rng);
                supervisor.supervise(child);
            }

            evaluate_population(evaluator, &mut offspring, config.parallel);

            base = select_survivors(
                base,
                offspring,
                config.survivor_strategy,
                config.base_population_size,
            );

            let gen_best = find_best(&base);
            let improved = gen_best.fitness() < best.fitness();
            if improved {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            supervisor.record_generation(improved);

            fitness_history.push(best.fitness());
            observer(gen + 1, best.fitness());

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                return EsResult {
                    best_fitness: best.fitness(),
                    best,
                    generations: gen + 1,
                    stagnated: true,
                    fitness_history,
                };
            }
        }

        EsResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            stagnated: false,
            fitness_history,
        }
    }

    /// Builds λ offspring from the mating pool: recombined children when
    /// recombination is configured, direct parent copies otherwise.
    fn produce_offspring<R: Rng>(
        base: &[Solution],
        pool: &[usize],
        config: &EsConfig,
        rng: &mut R,
    ) -> Vec<Solution> {
        let lambda = config.offspring_population_size;
        let mut offspring = Vec::with_capacity(lambda);

        match &config.recombination {
            Some(rc) => {
                let subset = rc.subset_size(config.base_population_size, pool.len());
                for _ in 0..lambda {
                    let picks = sample_distinct_parents(pool.len(), subset, rng);
                    let parents: Vec<&Solution> =
                        picks.iter().map(|&i| &base[pool[i]]).collect();

                    let objects: Vec<&[f64]> = parents
                        .iter()
                        .map(|p| p.object_coefficients.as_slice())
                        .collect();
                    let steps: Vec<&[f64]> =
                        parents.iter().map(|p| p.step_sizes.as_slice()).collect();
                    let angles: Vec<&[f64]> = parents
                        .iter()
                        .map(|p| p.rotation_angles.as_slice())
                        .collect();

                    offspring.push(Solution::new(
                        recombine(rc.object, &objects, rng),
                        recombine(rc.step_sizes, &steps, rng),
                        recombine(rc.rotation_angles, &angles, rng),
                    ));
                }
            }
            None => {
                for i in 0..lambda {
                    offspring.push(base[pool[i % pool.len()]].clone());
                }
            }
        }
        offspring
    }
}

/// Evaluates every solution, in parallel when requested.
///
/// Evaluation has no randomness, so the parallel path leaves seeded runs
/// byte-identical to sequential ones.
fn evaluate_population(evaluator: &Evaluator, population: &mut [Solution], parallel: bool) {
    if parallel {
        population.par_iter_mut().for_each(|s| {
            evaluator.evaluate(s);
        });
    } else {
        for s in population.iter_mut() {
            evaluator.evaluate(s);
        }
    }
}

/// The solution with the best (lowest) fitness.
fn find_best(population: &[Solution]) -> &Solution {
    population
        .iter()
        .min_by(|a, b| a.cmp_fitness(b))
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Benchmark;
    use crate::distance::DistanceMetric;
    use crate::es::{
        MutationVariant, OneFifthRule, ParentSelection, RecombinationConfig, SurvivorStrategy,
    };
    use crate::sampling::{generate_negative_points, generate_positive_points};

    /// 2-D ball scenario from a fixed seed: the canonical end-to-end case.
    fn ball_evaluator(config: &EsConfig) -> Evaluator {
        let benchmark = Benchmark::ball(2, 2.0, 4.0);
        let mut rng = StdRng::seed_from_u64(1234);
        let metric = DistanceMetric::Euclidean;
        let positives =
            generate_positive_points(&benchmark, 40, 1_000_000, metric, &mut rng).unwrap();
        let negatives = generate_negative_points(
            &benchmark, &positives, 40, 4.0, 1_000_000, metric, &mut rng,
        )
        .unwrap();
        Evaluator::new(positives, negatives, config)
    }

    fn base_config() -> EsConfig {
        EsConfig::new(2, 1)
            .with_base_population_size(15)
            .with_offspring_population_size(60)
            .with_mating_pool_size(60)
            .with_max_generations(40)
            .with_stagnation_limit(0)
            .with_seed(42)
    }

    #[test]
    fn test_one_step_engine_improves_on_initial_population() {
        let config = base_config().with_mutation(MutationVariant::UncorrelatedOneStep);
        let evaluator = ball_evaluator(&config);
        let result = EsRunner::run(&evaluator, &config);
        assert!(
            result.best_fitness <= result.fitness_history[0],
            "final best {} worse than initial best {}",
            result.best_fitness,
            result.fitness_history[0]
        );
    }

    #[test]
    fn test_best_so_far_is_monotone() {
        for (mutation, recombination) in [
            (MutationVariant::UncorrelatedOneStep, None),
            (MutationVariant::UncorrelatedNSteps, None),
            (
                MutationVariant::UncorrelatedNSteps,
                Some(RecombinationConfig::default()),
            ),
            (
                MutationVariant::Correlated,
                Some(RecombinationConfig::default()),
            ),
        ] {
            let mut config = base_config().with_mutation(mutation);
            config.recombination = recombination;
            let evaluator = ball_evaluator(&config);
            let result = EsRunner::run(&evaluator, &config);
            for window in result.fitness_history.windows(2) {
                assert!(
                    window[1] <= window[0],
                    "best-so-far worsened: {} -> {}",
                    window[0],
                    window[1]
                );
            }
        }
    }

    #[test]
    fn test_comma_strategy_runs() {
        let config = base_config()
            .with_survivor_strategy(SurvivorStrategy::Comma)
            .with_mutation(MutationVariant::UncorrelatedNSteps);
        let evaluator = ball_evaluator(&config);
        let result = EsRunner::run(&evaluator, &config);
        assert_eq!(result.generations, 40);
        // Best-so-far monotone even though the population best may worsen.
        for window in result.fitness_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_correlated_engine_with_one_fifth_rule() {
        let config = base_config()
            .with_mutation(MutationVariant::Correlated)
            .with_one_fifth_rule(OneFifthRule::default())
            .with_parent_selection(ParentSelection::FitnessWeighted);
        let evaluator = ball_evaluator(&config);
        let result = EsRunner::run(&evaluator, &config);
        assert!(result.best_fitness.is_finite());
        assert_eq!(result.fitness_history.len(), 41);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let config = base_config()
            .with_mutation(MutationVariant::Correlated)
            .with_recombination(RecombinationConfig::default());
        let evaluator = ball_evaluator(&config);
        let a = EsRunner::run(&evaluator, &config);
        let b = EsRunner::run(&evaluator, &config);
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.object_coefficients, b.best.object_coefficients);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = base_config().with_mutation(MutationVariant::UncorrelatedNSteps);
        let evaluator = ball_evaluator(&config);
        let sequential = EsRunner::run(&evaluator, &config.clone().with_parallel(false));
        let parallel = EsRunner::run(&evaluator, &config.with_parallel(true));
        assert_eq!(sequential.fitness_history, parallel.fitness_history);
        assert_eq!(
            sequential.best.object_coefficients,
            parallel.best.object_coefficients
        );
    }

    #[test]
    fn test_stagnation_termination() {
        let config = base_config()
            .with_max_generations(1000)
            .with_stagnation_limit(5);
        let evaluator = ball_evaluator(&config);
        let result = EsRunner::run(&evaluator, &config);
        assert!(
            result.stagnated || result.generations == 1000,
            "expected stagnation or budget exhaustion"
        );
        if result.stagnated {
            assert!(result.generations < 1000);
        }
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let config = base_config().with_max_generations(10);
        let evaluator = ball_evaluator(&config);
        let mut seen = Vec::new();
        EsRunner::run_with_observer(&evaluator, &config, |gen, fitness| {
            seen.push((gen, fitness));
        });
        assert_eq!(seen.len(), 10);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[9].0, 10);
    }

    #[test]
    #[should_panic(expected = "invalid EsConfig")]
    fn test_invalid_config_is_fatal() {
        let config = EsConfig::new(0, 1);
        let valid = EsConfig::new(2, 1);
        let evaluator = ball_evaluator(&valid);
        EsRunner::run(&evaluator, &config);
    }
}
