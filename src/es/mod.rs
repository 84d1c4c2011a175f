//! Self-adaptive Evolution Strategy engine.
//!
//! The engine follows the classic ES architecture: solutions carry both
//! object parameters (flattened constraint coefficients) and strategy
//! parameters (step sizes, optionally rotation angles) that evolve together.
//!
//! # Key Types
//!
//! - [`EsConfig`]: all parameters of one run, builder-style
//! - [`Solution`]: the genome, totally ordered by fitness
//! - [`Mutator`]: one-step / n-step / correlated self-adaptive mutation
//! - [`RuleSupervisor`]: variant-independent clamping and the 1/5 rule
//! - [`Evaluator`]: decodes a genome and scores it against sample points
//! - [`EsRunner`]: the generation loop; returns an [`EsResult`]
//!
//! The four engine variants of the configuration axes
//! {correlated vs uncorrelated} × {recombination on vs off} all run through
//! the same loop; the config decides which operators are wired in.

mod config;
mod evaluator;
mod mutation;
mod recombination;
mod runner;
mod selection;
mod solution;
mod supervisor;

pub use config::EsConfig;
pub use evaluator::Evaluator;
pub use mutation::{MutationVariant, Mutator};
pub use recombination::{
    recombine, sample_distinct_parents, RecombinationConfig, RecombinationKind,
};
pub use runner::{EsResult, EsRunner};
pub use selection::{select_survivors, ParentSelection, SurvivorStrategy};
pub use solution::Solution;
pub use supervisor::{OneFifthRule, RuleSupervisor};
