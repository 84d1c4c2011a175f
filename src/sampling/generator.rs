//! Rejection-sampling point generators.

use crate::benchmark::Benchmark;
use crate::distance::DistanceMetric;
use crate::geometry::{satisfies_all, violates_any, Point};
use rand::Rng;

/// Draws `count` points uniformly inside the benchmark's domains that
/// satisfy every ground-truth constraint, then fills in each point's
/// nearest-neighbour distance under `metric`.
///
/// `max_attempts` bounds the total number of candidate draws. Exhausting it
/// is a recoverable condition for the caller (the domain box may be far
/// larger than the feasible region), not a crash.
pub fn generate_positive_points<R: Rng>(
    benchmark: &Benchmark,
    count: usize,
    max_attempts: usize,
    metric: DistanceMetric,
    rng: &mut R,
) -> Result<Vec<Point>, String> {
    let mut points = Vec::with_capacity(count);
    let mut attempts = 0usize;
    while points.len() < count {
        if attempts >= max_attempts {
            return Err(format!(
                "positive-point generation exhausted {max_attempts} attempts \
                 after {} of {count} points",
                points.len()
            ));
        }
        attempts += 1;
        let candidate = random_in_domains(benchmark, rng);
        if satisfies_all(&candidate, &benchmark.constraints) {
            points.push(Point::new(candidate));
        }
    }
    fill_nearest_neighbour_distances(&mut points, metric);
    Ok(points)
}

/// Draws `count` near-boundary outside points.
///
/// Each candidate is sampled in a box around a random positive point, with
/// half-width `spread ×` that point's neighbour radius, clamped to the
/// domains. A candidate is accepted when it violates at least one
/// ground-truth constraint *and* lies farther from its nearest positive
/// point than that point's own neighbour radius, so negatives never crowd
/// into the positive cloud.
///
/// # Panics
/// Panics if `positives` is empty.
pub fn generate_negative_points<R: Rng>(
    benchmark: &Benchmark,
    positives: &[Point],
    count: usize,
    spread: f64,
    max_attempts: usize,
    metric: DistanceMetric,
    rng: &mut R,
) -> Result<Vec<Point>, String> {
    assert!(
        !positives.is_empty(),
        "negative generation requires a non-empty positive set"
    );
    let mut points = Vec::with_capacity(count);
    let mut attempts = 0usize;
    while points.len() < count {
        if attempts >= max_attempts {
            return Err(format!(
                "negative-point generation exhausted {max_attempts} attempts \
                 after {} of {count} points",
                points.len()
            ));
        }
        attempts += 1;

        let anchor = &positives[rng.random_range(0..positives.len())];
        let radius = anchor.nearest_neighbour_distance;
        let half_width = if radius.is_finite() { spread * radius } else { 1.0 };
        let candidate: Vec<f64> = anchor
            .coordinates
            .iter()
            .zip(&benchmark.domains)
            .map(|(&c, domain)| domain.clamp(c + rng.random_range(-half_width..=half_width)))
            .collect();

        if !violates_any(&candidate, &benchmark.constraints) {
            continue;
        }
        if let Some((nearest, dist)) = nearest_positive(&candidate, positives, metric) {
            if dist <= nearest.nearest_neighbour_distance {
                continue;
            }
        }
        points.push(Point::new(candidate));
    }
    Ok(points)
}

/// Computes every point's distance to its nearest neighbour within `points`.
///
/// A singleton set keeps `f64::INFINITY`. O(n²) pairwise scan.
pub fn fill_nearest_neighbour_distances(points: &mut [Point], metric: DistanceMetric) {
    let coords: Vec<Vec<f64>> = points.iter().map(|p| p.coordinates.clone()).collect();
    for (i, point) in points.iter_mut().enumerate() {
        let mut nearest = f64::INFINITY;
        for (j, other) in coords.iter().enumerate() {
            if i != j {
                nearest = nearest.min(metric.calculate(&point.coordinates, other));
            }
        }
        point.nearest_neighbour_distance = nearest;
    }
}

fn random_in_domains<R: Rng>(benchmark: &Benchmark, rng: &mut R) -> Vec<f64> {
    benchmark
        .domains
        .iter()
        .map(|d| {
            if d.width() == 0.0 {
                d.lower()
            } else {
                rng.random_range(d.lower()..=d.upper())
            }
        })
        .collect()
}

fn nearest_positive<'a>(
    candidate: &[f64],
    positives: &'a [Point],
    metric: DistanceMetric,
) -> Option<(&'a Point, f64)> {
    positives
        .iter()
        .map(|p| (p, metric.calculate(candidate, &p.coordinates)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
