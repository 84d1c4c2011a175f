//! Per-dimension variable bounds.

/// A closed interval `[lower, upper]` bounding one problem dimension.
///
/// Domains are produced by a benchmark and never change afterwards.
///
/// # Examples
///
/// ```
/// use constraint_es::geometry::Domain;
///
/// let d = Domain::new(-3.0, 3.0);
/// assert!(d.contains(0.0));
/// assert!(!d.contains(3.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    lower: f64,
    upper: f64,
}

impl Domain {
    /// Creates a domain from its bounds.
    ///
    /// # Panics
    /// Panics if `lower > upper` or either bound is NaN.
    pub fn new(lower: f64, upper: f64) -> Self {
        assert!(
            lower <= upper,
            "domain lower bound {lower} exceeds upper bound {upper}"
        );
        Self { lower, upper }
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies within the bounds (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Clamps `value` into the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}
