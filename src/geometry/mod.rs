//! Geometric primitives shared across the crate.
//!
//! - [`Domain`]: per-dimension lower/upper bound
//! - [`Constraint`]: linear or ball inequality with a satisfaction test
//! - [`Point`]: a sample point carrying its nearest-neighbour distance

mod constraint;
mod domain;
mod point;

pub use constraint::{satisfies_all, violates_any, Constraint};
pub use domain::Domain;
pub use point::Point;
