//! Variant-independent mutation rule supervision.
//!
//! Raw mutation already keeps itself numerically sane, but the supervisor
//! enforces the global policy once per offspring, after mutation and before
//! evaluation: step sizes stay at or above the configured floor, rotation
//! angles stay inside `(−π, π]`, and — when configured — the classic 1/5
//! success rule rescales step sizes at window boundaries. Object
//! coefficients are never touched.

use super::config::EsConfig;
use super::mutation::wrap_angle;
use super::solution::Solution;

/// Parameters of the 1/5 success rule (Rechenberg).
///
/// Every `window` generations the supervisor compares the fraction of
/// improving generations against `target_ratio`: above it the search is
/// succeeding too easily and step sizes scale up by `1/adjustment`; at or
/// below it they scale down by `adjustment`. `adjustment` must lie in
/// `(0, 1)`; the classic value is 0.85.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneFifthRule {
    /// Generations per measurement window.
    pub window: usize,
    /// Success-ratio threshold, classically 1/5.
    pub target_ratio: f64,
    /// Multiplicative step-size adjustment in `(0, 1)`.
    pub adjustment: f64,
}

impl Default for OneFifthRule {
    fn default() -> Self {
        Self {
            window: 10,
            target_ratio: 0.2,
            adjustment: 0.85,
        }
    }
}

/// Applies corrective policy to offspring after mutation.
///
/// Usage per generation: call [`begin_generation`](Self::begin_generation)
/// once, [`supervise`](Self::supervise) on every offspring, and
/// [`record_generation`](Self::record_generation) with whether the best
/// fitness improved.
#[derive(Debug, Clone)]
pub struct RuleSupervisor {
    min_step_size: f64,
    rule: Option<OneFifthRule>,
    successes: usize,
    observed: usize,
    /// Scale decided at the last window boundary, applied to the next
    /// generation's offspring exactly once.
    pending_scale: f64,
    current_scale: f64,
}

impl RuleSupervisor {
    /// Builds a supervisor from the run configuration.
    pub fn new(config: &EsConfig) -> Self {
        Self {
            min_step_size: config.min_step_size,
            rule: config.one_fifth_rule,
            successes: 0,
            observed: 0,
            pending_scale: 1.0,
            current_scale: 1.0,
        }
    }

    /// Activates any pending window adjustment for the coming generation.
    pub fn begin_generation(&mut self) {
        self.current_scale = self.pending_scale;
        self.pending_scale = 1.0;
    }

    /// Clamps and normalizes one offspring's adaptive parameters.
    ///
    /// Never modifies `object_coefficients`.
    pub fn supervise(&self, solution: &mut Solution) {
        for sigma in &mut solution.step_sizes {
            *sigma = (*sigma * self.current_scale).max(self.min_step_size);
        }
        for angle in &mut solution.rotation_angles {
            *angle = wrap_angle(*angle);
        }
    }

    /// Feeds the generation outcome into the success-rate window.
    ///
    /// A no-op unless a 1/5 rule is configured.
    pub fn record_generation(&mut self, improved: bool) {
        let Some(rule) = self.rule else {
            return;
        };
        self.observed += 1;
        if improved {
            self.successes += 1;
        }
        if self.observed >= rule.window {
            let ratio = self.successes as f64 / self.observed as f64;
            self.pending_scale = if ratio > rule.target_ratio {
                1.0 / rule.adjustment
            } else {
                rule.adjustment
            };
            self.observed = 0;
            self.successes = 0;
        }
    }
}
