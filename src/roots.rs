//! Scalar root helpers using `tinyvec::ArrayVec`.
//!
//! Available functions:
//! - `root_linear()`
//! - `newton_bracketed()`
use num_traits::Float;

use crate::{lit, ArrayVec};

/// Outcome of an iterative root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root<F> {
    /// Best estimate found, even when the search did not converge.
    pub value: F,
    pub iterations: usize,
    pub converged: bool,
}

/// Root of `a*x + b = 0`, empty if `a` vanishes.
pub(crate) fn root_linear<F: Float + Default>(a: F, b: F) -> ArrayVec<[F; 1]> {
    let mut r = ArrayVec::new();
    if a.abs() <= F::epsilon() {
        return r;
    }
    r.push(-b / a);
    r
}

/// Find the root of the monotonically non-decreasing function `f` inside `[lo, hi]`
/// close to `start`, given its derivative `d`.
///
/// Uses the Newton-Raphson method because it is suited for splines as they are cont. differentiable,
/// but keeps a bracket around the root: a step that would leave the bracket, or a derivative
/// too small to divide by, is replaced by a bisection step. The search stops once two successive
/// estimates differ by less than `eps`, or after `max_iter` steps with the best estimate so far.
pub(crate) fn newton_bracketed<F, Func, Deriv>(
    start: F,
    mut lo: F,
    mut hi: F,
    f: Func,
    d: Deriv,
    eps: F,
    max_iter: usize,
) -> Root<F>
where
    F: Float,
    Func: Fn(F) -> F,
    Deriv: Fn(F) -> F,
{
    let half = lit::<F>(0.5);
    let mut x = start.max(lo).min(hi);
    for i in 1..=max_iter {
        let fx = f(x);
        if fx == F::zero() {
            return Root { value: x, iterations: i, converged: true };
        }
        if fx < F::zero() {
            lo = x;
        } else {
            hi = x;
        }

        let dx = d(x);
        let mut x1 = if dx > F::epsilon() { x - fx / dx } else { F::nan() };
        // NaN fails both comparisons and falls back to bisection as well
        if !(x1 >= lo && x1 <= hi) {
            x1 = (lo + hi) * half;
        }
        if (x1 - x).abs() < eps {
            return Root { value: x1, iterations: i, converged: true };
        }
        x = x1;
    }
    Root { value: x, iterations: max_iter, converged: false }
}
