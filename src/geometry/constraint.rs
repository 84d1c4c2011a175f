//! Linear and ball inequality constraints.

/// A geometric inequality constraint over problem-space coordinates.
///
/// Both variants carry one coefficient per dimension and a limiting value:
///
/// - `Linear`: `Σ c_i · x_i ≤ limit` — a half-space
/// - `Ball`: `Σ c_i · x_i² ≤ limit` — an axis-aligned ellipsoid
///   (a ball when all coefficients are equal)
///
/// # Examples
///
/// ```
/// use constraint_es::geometry::Constraint;
///
/// let half_space = Constraint::linear(vec![1.0, 2.0], 5.0);
/// assert!(half_space.is_satisfied(&[1.0, 1.0]));   // 3 <= 5
/// assert!(!half_space.is_satisfied(&[3.0, 2.0]));  // 7 > 5
///
/// let ball = Constraint::ball(vec![1.0, 1.0], 4.0);
/// assert!(ball.is_satisfied(&[1.0, 1.0]));         // 2 <= 4
/// assert!(!ball.is_satisfied(&[2.0, 2.0]));        // 8 > 4
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Half-space: `Σ c_i · x_i ≤ limit`.
    Linear {
        /// One coefficient per dimension.
        coefficients: Vec<f64>,
        /// Right-hand side of the inequality.
        limit: f64,
    },
    /// Ellipsoid: `Σ c_i · x_i² ≤ limit`.
    Ball {
        /// One coefficient per dimension.
        coefficients: Vec<f64>,
        /// Right-hand side of the inequality.
        limit: f64,
    },
}

impl Constraint {
    /// Creates a linear constraint.
    pub fn linear(coefficients: Vec<f64>, limit: f64) -> Self {
        Constraint::Linear {
            coefficients,
            limit,
        }
    }

    /// Creates a ball constraint.
    pub fn ball(coefficients: Vec<f64>, limit: f64) -> Self {
        Constraint::Ball {
            coefficients,
            limit,
        }
    }

    /// The coefficient vector, one entry per dimension.
    pub fn coefficients(&self) -> &[f64] {
        match self {
            Constraint::Linear { coefficients, .. } | Constraint::Ball { coefficients, .. } => {
                coefficients
            }
        }
    }

    /// The limiting value (right-hand side).
    pub fn limit(&self) -> f64 {
        match self {
            Constraint::Linear { limit, .. } | Constraint::Ball { limit, .. } => *limit,
        }
    }

    /// Tests whether `point` satisfies the inequality.
    ///
    /// # Panics
    /// Panics if `point` has a different length than the coefficient vector —
    /// a construction bug, not a runtime condition.
    pub fn is_satisfied(&self, point: &[f64]) -> bool {
        let coeffs = self.coefficients();
        assert_eq!(
            coeffs.len(),
            point.len(),
            "constraint dimensionality {} does not match point dimensionality {}",
            coeffs.len(),
            point.len()
        );
        let lhs: f64 = match self {
            Constraint::Linear { .. } => coeffs.iter().zip(point).map(|(c, x)| c * x).sum(),
            Constraint::Ball { .. } => coeffs.iter().zip(point).map(|(c, x)| c * x * x).sum(),
        };
        lhs <= self.limit()
    }

    /// Whether any coefficient is meaningfully non-zero.
    ///
    /// An all-zero constraint is trivially satisfied (for `limit ≥ 0`) or
    /// trivially violated and contributes nothing geometric.
    pub fn is_effective(&self) -> bool {
        self.coefficients().iter().any(|c| c.abs() > 1e-9)
    }
}

/// Whether `point` satisfies every constraint in `constraints`.
///
/// Order-invariant: the result depends only on the set of constraints.
pub fn satisfies_all(point: &[f64], constraints: &[Constraint]) -> bool {
    constraints.iter().all(|c| c.is_satisfied(point))
}

/// Whether `point` violates at least one constraint in `constraints`.
pub fn violates_any(point: &[f64], constraints: &[Constraint]) -> bool {
    !satisfies_all(point, constraints)
}
