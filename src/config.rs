//! Numerical settings shared by build and query.

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::error::SplineError;

/// Tolerances and limits of a [`QuadSpline`](crate::QuadSpline).
///
/// With the defaults, Newton-Raphson stops once two
/// successive estimates differ by less than `1e-6`, tangents shorter than
/// `sqrt(1e-7)` are returned unnormalized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", default)
)]
pub struct SplineConfig {
    /// Convergence threshold on the natural parameter step.
    pub tolerance: f64,
    /// Hard cap on Newton-Raphson iterations per query.
    pub max_iterations: usize,
    /// Squared tangent length below which tangents are left unnormalized.
    pub tangent_epsilon: f64,
    /// Relative threshold for treating a segment as linear or collinear.
    pub degenerate_epsilon: f64,
    /// Report a capped inversion as [`SplineError::NonConvergence`] instead of
    /// returning the best estimate.
    pub strict_convergence: bool,
}

impl Default for SplineConfig {
    fn default() -> Self {
        SplineConfig {
            tolerance: 1e-6,
            max_iterations: 50,
            tangent_epsilon: 1e-7,
            degenerate_epsilon: 1e-10,
            strict_convergence: false,
        }
    }
}

impl SplineConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tangent_epsilon(mut self, tangent_epsilon: f64) -> Self {
        self.tangent_epsilon = tangent_epsilon;
        self
    }

    pub fn with_degenerate_epsilon(mut self, degenerate_epsilon: f64) -> Self {
        self.degenerate_epsilon = degenerate_epsilon;
        self
    }

    pub fn with_strict_convergence(mut self, strict: bool) -> Self {
        self.strict_convergence = strict;
        self
    }

    /// Reject settings the solver cannot work with.
    pub fn validate(&self) -> Result<(), SplineError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.tolerance)
            || !positive(self.tangent_epsilon)
            || !positive(self.degenerate_epsilon)
            || self.max_iterations == 0
        {
            return Err(SplineError::InvalidConfig);
        }
        Ok(())
    }
}
