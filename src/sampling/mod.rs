//! Positive / negative sample-point generation.
//!
//! Positive points lie inside the benchmark's true region; negative points
//! lie outside but near the boundary. Both sets are produced once before the
//! evolutionary loop starts and stay immutable for the run's duration.

mod generator;

pub use generator::{
    fill_nearest_neighbour_distances, generate_negative_points, generate_positive_points,
};
