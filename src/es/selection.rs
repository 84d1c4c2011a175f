//! Parent and survivor selection.
//!
//! Parent selection draws a mating pool from the base population with
//! replacement; survivor selection is truncation over a plus or comma pool.
//! Both assume minimization (lower fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::solution::Solution;
use rand::Rng;

/// Strategy for drawing parents into the mating pool.
///
/// Draws are with replacement; the same parent may appear several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentSelection {
    /// Every base-population member is equally likely — the classic ES
    /// choice, leaving selection pressure to the survivor step.
    #[default]
    Uniform,
    /// Fitness-proportionate draw using an inverse-fitness transform
    /// (minimization): `weight_i = max_fitness − fitness_i + ε`.
    ///
    /// **Warning**: susceptible to super-individual dominance when fitness
    /// variance is high.
    FitnessWeighted,
}

impl ParentSelection {
    /// Selects one parent index from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Solution], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        match self {
            ParentSelection::Uniform => rng.random_range(0..population.len()),
            ParentSelection::FitnessWeighted => fitness_weighted(population, rng),
        }
    }
}

/// Inverse-fitness roulette: lower fitness gets a higher weight.
fn fitness_weighted<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population.iter().map(|s| s.fitness()).collect();
    let max_fitness = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max_fitness.is_finite() {
        // Unevaluated or degenerate population; fall back to uniform.
        return rng.random_range(0..n);
    }

    let epsilon = 1e-10;
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| {
            let w = max_fitness - f + epsilon;
            if w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Which pool survivors are truncated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurvivorStrategy {
    /// (μ + λ): parents compete with offspring; elitist.
    #[default]
    Plus,
    /// (μ, λ): offspring only; parents always die.
    Comma,
}

/// Truncation survivor selection: keep the best `target_size` of the pool.
///
/// The sort is stable and total (`f64::total_cmp`), so equal-fitness ties
/// resolve deterministically by pool order and NaN fitness cannot panic the
/// sort. Idempotent on an already-sorted population of `target_size`.
///
/// # Panics
/// Panics if the selected pool holds fewer than `target_size` solutions.
pub fn select_survivors(
    base: Vec<Solution>,
    offspring: Vec<Solution>,
    strategy: SurvivorStrategy,
    target_size: usize,
) -> Vec<Solution> {
    let mut pool = match strategy {
        SurvivorStrategy::Plus => {
            let mut pool = base;
            pool.extend(offspring);
            pool
        }
        SurvivorStrategy::Comma => offspring,
    };
    assert!(
        pool.len() >= target_size,
        "survivor pool of {} cannot fill a population of {target_size}",
        pool.len()
    );
    pool.sort_by(Solution::cmp_fitness);
    pool.truncate(target_size);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solution(fitness: f64) -> Solution {
        let mut s = Solution::new(vec![0.0], vec![1.0], vec![]);
        s.set_fitness(fitness);
        s
    }

    fn population(fitnesses: &[f64]) -> Vec<Solution> {
        fitnesses.iter().map(|&f| solution(f)).collect()
    }

    #[test]
    fn test_uniform_covers_population() {
        let pop = population(&[3.0, 1.0, 2.0, 4.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[ParentSelection::Uniform.select(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform draws, got {counts:?}");
        }
    }

    #[test]
    fn test_fitness_weighted_favors_best() {
        let pop = population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[ParentSelection::FitnessWeighted.select(&pop, &mut rng)] += 1;
        }
        assert!(
            counts[2] > counts[0],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_fitness_weighted_single_member() {
        let pop = population(&[5.0]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(ParentSelection::FitnessWeighted.select(&pop, &mut rng), 0);
    }

    #[test]
    fn test_fitness_weighted_unevaluated_population() {
        // All-infinite fitness must not produce NaN weights.
        let pop = vec![
            Solution::new(vec![0.0], vec![1.0], vec![]),
            Solution::new(vec![0.0], vec![1.0], vec![]),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let idx = ParentSelection::FitnessWeighted.select(&pop, &mut rng);
        assert!(idx < 2);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = StdRng::seed_from_u64(42);
        ParentSelection::Uniform.select(&[], &mut rng);
    }

    #[test]
    fn test_plus_keeps_elite_parents() {
        let base = population(&[1.0, 9.0]);
        let offspring = population(&[5.0, 7.0]);
        let survivors = select_survivors(base, offspring, SurvivorStrategy::Plus, 2);
        let fits: Vec<f64> = survivors.iter().map(|s| s.fitness()).collect();
        assert_eq!(fits, vec![1.0, 5.0]);
    }

    #[test]
    fn test_comma_discards_parents() {
        let base = population(&[1.0, 2.0]);
        let offspring = population(&[5.0, 7.0, 6.0]);
        let survivors = select_survivors(base, offspring, SurvivorStrategy::Comma, 2);
        let fits: Vec<f64> = survivors.iter().map(|s| s.fitness()).collect();
        assert_eq!(fits, vec![5.0, 6.0]);
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let sorted = population(&[1.0, 2.0, 3.0]);
        let again = select_survivors(sorted.clone(), Vec::new(), SurvivorStrategy::Plus, 3);
        let fits: Vec<f64> = again.iter().map(|s| s.fitness()).collect();
        let orig: Vec<f64> = sorted.iter().map(|s| s.fitness()).collect();
        assert_eq!(fits, orig);
    }

    #[test]
    fn test_ties_do_not_crash_and_stay_deterministic() {
        let base = population(&[2.0, 2.0, 2.0, 2.0]);
        let offspring = population(&[2.0, 2.0]);
        let a = select_survivors(base.clone(), offspring.clone(), SurvivorStrategy::Plus, 4);
        let b = select_survivors(base, offspring, SurvivorStrategy::Plus, 4);
        assert_eq!(
            a.iter().map(Solution::fitness).collect::<Vec<_>>(),
            b.iter().map(Solution::fitness).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_nan_fitness_sorts_last() {
        let base = population(&[f64::NAN, 1.0]);
        let survivors = select_survivors(base, Vec::new(), SurvivorStrategy::Plus, 1);
        assert_eq!(survivors[0].fitness(), 1.0);
    }

    #[test]
    #[should_panic(expected = "survivor pool")]
    fn test_undersized_pool_panics() {
        select_survivors(population(&[1.0]), Vec::new(), SurvivorStrategy::Plus, 5);
    }
}
