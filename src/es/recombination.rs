//! Recombination operators.
//!
//! Recombination acts independently on each of the genome's three vectors —
//! object coefficients, step sizes, rotation angles — with a per-vector
//! choice of operator. Parent-subset sampling is shared by all variants as a
//! free function rather than an operator base class.

use rand::Rng;

/// Per-position recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecombinationKind {
    /// Each position is copied from one parent chosen uniformly at random,
    /// independently per position.
    Discrete,
    /// Each position is the mean across all parents.
    Intermediate,
}

/// Which operator applies to which genome vector, plus the mating-subset
/// fraction.
///
/// The canonical ES choice is discrete recombination for object parameters
/// and intermediate recombination for strategy parameters, which the
/// defaults follow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecombinationConfig {
    /// Operator for the object coefficients.
    pub object: RecombinationKind,
    /// Operator for the step sizes.
    pub step_sizes: RecombinationKind,
    /// Operator for the rotation angles (correlated mutation only).
    pub rotation_angles: RecombinationKind,
    /// Fraction of the base population recombined per offspring; the subset
    /// size is `part_of_population × base_population_size`, at least 2.
    pub part_of_population: f64,
}

impl Default for RecombinationConfig {
    fn default() -> Self {
        Self {
            object: RecombinationKind::Discrete,
            step_sizes: RecombinationKind::Intermediate,
            rotation_angles: RecombinationKind::Intermediate,
            part_of_population: 0.5,
        }
    }
}

impl RecombinationConfig {
    /// Number of distinct parents per recombination event for a pool of
    /// `pool_size` candidates: `part_of_population × base_population_size`,
    /// clamped into `[2, pool_size]`.
    pub fn subset_size(&self, base_population_size: usize, pool_size: usize) -> usize {
        let raw = (self.part_of_population * base_population_size as f64).round() as usize;
        raw.clamp(2, pool_size.max(2)).min(pool_size)
    }
}

/// Samples `count` *distinct* indices from `0..pool_size` uniformly.
///
/// Draws with rejection: indices are drawn uniformly and duplicates are
/// re-drawn until `count` distinct ones are collected.
///
/// # Panics
/// Panics if `count == 0` or `count > pool_size`.
pub fn sample_distinct_parents<R: Rng>(pool_size: usize, count: usize, rng: &mut R) -> Vec<usize> {
    assert!(count >= 1, "must sample at least one parent");
    assert!(
        count <= pool_size,
        "cannot sample {count} distinct parents from a pool of {pool_size}"
    );
    let mut chosen: Vec<usize> = Vec::with_capacity(count);
    while chosen.len() < count {
        let idx = rng.random_range(0..pool_size);
        if !chosen.contains(&idx) {
            chosen.push(idx);
        }
    }
    chosen
}

/// Recombines one genome vector from the same-position rows of `parents`.
///
/// Returns a fresh vector of the parents' common length; an empty vector
/// (e.g. rotation angles under uncorrelated mutation) recombines to empty.
///
/// # Panics
/// Panics if `parents` is empty or the rows have differing lengths.
pub fn recombine<R: Rng>(kind: RecombinationKind, parents: &[&[f64]], rng: &mut R) -> Vec<f64> {
    assert!(!parents.is_empty(), "recombination requires at least one parent");
    let len = parents[0].len();
    for row in parents {
        assert_eq!(row.len(), len, "parent vectors must have equal length");
    }
    match kind {
        RecombinationKind::Discrete => (0..len)
            .map(|i| parents[rng.random_range(0..parents.len())][i])
            .collect(),
        RecombinationKind::Intermediate => (0..len)
            .map(|i| parents.iter().map(|row| row[i]).sum::<f64>() / parents.len() as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_distinct_sampling_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let sample = sample_distinct_parents(10, 6, &mut rng);
            assert_eq!(sample.len(), 6);
            let mut sorted = sample.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 6, "duplicate parent index in {sample:?}");
        }
    }

    #[test]
    fn test_distinct_sampling_full_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sample = sample_distinct_parents(5, 5, &mut rng);
        sample.sort_unstable();
        assert_eq!(sample, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "cannot sample")]
    fn test_oversampling_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        sample_distinct_parents(3, 4, &mut rng);
    }

    #[test]
    fn test_discrete_copies_positions_from_parents() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = [1.0, 1.0, 1.0, 1.0];
        let b = [2.0, 2.0, 2.0, 2.0];
        let child = recombine(RecombinationKind::Discrete, &[&a[..], &b[..]], &mut rng);
        assert_eq!(child.len(), 4);
        for v in child {
            assert!(v == 1.0 || v == 2.0);
        }
    }

    #[test]
    fn test_discrete_mixes_eventually() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = [1.0; 16];
        let b = [2.0; 16];
        let child = recombine(RecombinationKind::Discrete, &[&a[..], &b[..]], &mut rng);
        assert!(child.iter().any(|&v| v == 1.0));
        assert!(child.iter().any(|&v| v == 2.0));
    }

    #[test]
    fn test_intermediate_averages() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = [1.0, 4.0];
        let b = [3.0, 0.0];
        let c = [2.0, 2.0];
        let child = recombine(RecombinationKind::Intermediate, &[&a[..], &b[..], &c[..]], &mut rng);
        assert_eq!(child, vec![2.0, 2.0]);
    }

    #[test]
    fn test_empty_vectors_recombine_to_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let a: [f64; 0] = [];
        let b: [f64; 0] = [];
        for kind in [RecombinationKind::Discrete, RecombinationKind::Intermediate] {
            assert!(recombine(kind, &[&a[..], &b[..]], &mut rng).is_empty());
        }
    }

    #[test]
    fn test_subset_size_bounds() {
        let rc = RecombinationConfig {
            part_of_population: 0.5,
            ..RecombinationConfig::default()
        };
        assert_eq!(rc.subset_size(30, 100), 15);
        assert_eq!(rc.subset_size(2, 100), 2); // never below 2
        assert_eq!(rc.subset_size(30, 4), 4); // capped at the pool
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        recombine(RecombinationKind::Discrete, &[&[1.0][..], &[1.0, 2.0][..]], &mut rng);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_sampling_yields_exactly_count_distinct(
                seed in any::<u64>(),
                pool_size in 2usize..40,
                fraction in 0.01f64..=1.0,
            ) {
                let count = ((pool_size as f64 * fraction).ceil() as usize).clamp(1, pool_size);
                let mut rng = StdRng::seed_from_u64(seed);
                let mut sample = sample_distinct_parents(pool_size, count, &mut rng);
                prop_assert_eq!(sample.len(), count);
                sample.sort_unstable();
                sample.dedup();
                prop_assert_eq!(sample.len(), count);
            }

            #[test]
            fn prop_discrete_child_values_come_from_parents(
                seed in any::<u64>(),
                a in proptest::collection::vec(-10.0f64..10.0, 8),
                b in proptest::collection::vec(-10.0f64..10.0, 8),
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let child =
                    recombine(RecombinationKind::Discrete, &[a.as_slice(), b.as_slice()], &mut rng);
                for (i, &v) in child.iter().enumerate() {
                    prop_assert!(v == a[i] || v == b[i]);
                }
            }
        }
    }
}
