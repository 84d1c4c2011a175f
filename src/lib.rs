//! Self-adaptive evolution strategies for geometric constraint synthesis.
//!
//! Given sample points labeled *inside* and *outside* an unknown region, the
//! crate searches for a compact set of geometric constraints (linear and ball
//! inequalities) that reproduces the labeling. The search is a classic
//! (μ + λ) / (μ, λ) Evolution Strategy with self-adaptive mutation strengths:
//!
//! - **Mutation**: uncorrelated one-step, uncorrelated n-step, and fully
//!   correlated (rotation-angle) self-adaptation.
//! - **Recombination**: discrete or intermediate, applied independently to
//!   object coefficients, step sizes, and rotation angles.
//! - **Selection**: stochastic parent sampling plus truncation survivor
//!   selection over a plus or comma pool.
//!
//! # Pipeline
//!
//! 1. A [`benchmark::Benchmark`] supplies ground-truth domains and
//!    constraints.
//! 2. [`sampling`] draws positive (inside) and near-boundary negative
//!    (outside) points against it.
//! 3. An [`es::Evaluator`] scores candidate constraint sets against those
//!    points; [`es::EsRunner`] drives the generation loop.
//! 4. [`reduction::RedundancyRemover`] strips constraints that are never
//!    binding, and [`export`] writes the survivors as an LP-format block.
//!
//! # References
//!
//! - Bäck & Schwefel (1993), *An Overview of Evolutionary Algorithms for
//!   Parameter Optimization*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, ch. 4
//! - Rechenberg (1973), *Evolutionsstrategie* (the 1/5 success rule)

pub mod benchmark;
pub mod distance;
pub mod es;
pub mod export;
pub mod geometry;
pub mod reduction;
pub mod sampling;
