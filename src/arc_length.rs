//! Closed-form arc length of a quadratic Bézier and its inversion.
//!
//! The speed of `B(u)` is `sqrt(A·u² + B·u + C)`, so the length up to `u` has the
//! antiderivative
//!
//! ```text
//! L(u) = [2·√A·(2A·u·S(u) + B·(S(u) − √C)) + E·(D − ln(B + 2A·u + 2·√A·S(u)))] / (8·A^1.5)
//! S(u) = sqrt(A·u² + B·u + C),  D = ln(B + 2·√A·√C),  E = B² − 4AC
//! ```
//!
//! The formula breaks down when `A` vanishes (straight, evenly spaced control
//! points) and when `E` vanishes (control points on a common line, where the
//! logarithm's argument can reach zero). Those segments are classified up front
//! and integrated with their own exact expressions instead.
use core::fmt::Debug;

use num_traits::Float;

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::config::SplineConfig;
use crate::point::PointDot;
use crate::quadratic_bezier::QuadraticBezier;
use crate::roots::newton_bracketed;
use crate::lit;

/// How the length of a segment is integrated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentShape {
    /// General case, closed-form antiderivative.
    Regular,
    /// Constant speed (`A ≈ 0`): `L(u) = √C·u`.
    Linear,
    /// Control points on one line (`E ≈ 0`): speed `|√A·u ± √C|`, possibly with a reversal.
    Collinear,
    /// All control points coincide.
    Point,
}

/// How an inverted parameter was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub enum Convergence {
    /// No iteration needed (curve end points, linear segments).
    Exact,
    /// Newton-Raphson converged.
    Converged { iterations: usize },
    /// The iteration cap was hit; the value is the best estimate found.
    Capped { iterations: usize },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        !matches!(self, Convergence::Capped { .. })
    }
}

/// Natural parameter found for a requested length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Inversion<F> {
    pub u: F,
    pub convergence: Convergence,
}

/// Cached coefficients of the length function of one segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcLength<F> {
    a: F,
    b: F,
    c: F,
    sqrt_a: F,
    sqrt_c: F,
    d: F,
    e: F,
    shape: SegmentShape,
    total: F,
}

impl<F> ArcLength<F>
where
    F: Float + Debug,
{
    /// Coefficients of the squared speed `A·u² + B·u + C`.
    ///
    /// `degenerate_eps` is relative: `A` is treated as zero below `eps·(A + C)` and
    /// `E` below `eps·4AC`.
    pub fn new(a: F, b: F, c: F, degenerate_eps: F) -> Self {
        let two = lit::<F>(2.0);
        let four = lit::<F>(4.0);

        let sqrt_a = a.max(F::zero()).sqrt();
        let sqrt_c = c.max(F::zero()).sqrt();
        let d = (b + two * sqrt_a * sqrt_c).ln();
        let e = b * b - four * a * c;

        let scale = a + c;
        let shape = if !(scale > F::min_positive_value()) {
            SegmentShape::Point
        } else if a <= degenerate_eps * scale {
            SegmentShape::Linear
        } else if e >= -degenerate_eps * four * a * c {
            SegmentShape::Collinear
        } else {
            SegmentShape::Regular
        };

        let mut arc = ArcLength { a, b, c, sqrt_a, sqrt_c, d, e, shape, total: F::zero() };
        arc.total = arc.length_at(F::one());
        arc
    }

    pub fn shape(&self) -> SegmentShape {
        self.shape
    }

    /// `(A, B, C)` of the squared speed polynomial.
    pub fn coefficients(&self) -> (F, F, F) {
        (self.a, self.b, self.c)
    }

    /// Length of the whole segment, `L(1)`.
    pub fn total(&self) -> F {
        self.total
    }

    /// Speed `|B'(u)|` at natural parameter `u`.
    pub fn speed(&self, u: F) -> F {
        (self.c + u * (self.b + self.a * u)).max(F::zero()).sqrt()
    }

    /// Arc length from `u = 0` up to `u`.
    pub fn length_at(&self, u: F) -> F {
        match self.shape {
            SegmentShape::Regular => self.closed_form(u),
            SegmentShape::Linear => self.sqrt_c * u,
            SegmentShape::Collinear => self.collinear(u),
            SegmentShape::Point => F::zero(),
        }
    }

    fn closed_form(&self, u: F) -> F {
        let (a, b) = (self.a, self.b);
        let two = lit::<F>(2.0);

        let temp1 = self.speed(u);
        let temp2 = two * a * u * temp1 + b * (temp1 - self.sqrt_c);
        let temp4 = (b + two * a * u + two * self.sqrt_a * temp1).ln();
        let temp5 = two * self.sqrt_a * temp2;
        let temp6 = self.e * (self.d - temp4);

        (temp5 + temp6) / (lit::<F>(8.0) * a.powf(lit(1.5)))
    }

    // speed is |alpha·u + beta|; integrate G(u) = alpha·u²/2 + beta·u piecewise around its sign change
    fn collinear(&self, u: F) -> F {
        let alpha = self.sqrt_a;
        let beta = if self.b < F::zero() { -self.sqrt_c } else { self.sqrt_c };
        let half = lit::<F>(0.5);
        let g = |x: F| half * alpha * x * x + beta * x;

        let turn = -beta / alpha;
        if turn > F::zero() && turn < u {
            g(turn).abs() + (g(u) - g(turn)).abs()
        } else {
            g(u).abs()
        }
    }

    /// Find the natural parameter `u` in `[0, 1]` with `L(u) = target`, starting at `guess`.
    pub fn invert(&self, target: F, guess: F, config: &SplineConfig) -> Inversion<F> {
        let clamp = |u: F| u.max(F::zero()).min(F::one());
        match self.shape {
            SegmentShape::Point => Inversion { u: clamp(guess), convergence: Convergence::Exact },
            SegmentShape::Linear => Inversion {
                u: clamp(target / self.sqrt_c),
                convergence: Convergence::Exact,
            },
            SegmentShape::Regular | SegmentShape::Collinear => {
                let root = newton_bracketed(
                    clamp(guess),
                    F::zero(),
                    F::one(),
                    |u| self.length_at(u) - target,
                    |u| self.speed(u),
                    lit(config.tolerance),
                    config.max_iterations,
                );
                let convergence = if root.converged {
                    Convergence::Converged { iterations: root.iterations }
                } else {
                    Convergence::Capped { iterations: root.iterations }
                };
                Inversion { u: root.value, convergence }
            }
        }
    }
}

impl<F> ArcLength<F>
where
    F: Float + Debug + Default,
{
    /// Length function of `curve`, from its derivative `B'(u) = 2·a·u + b`
    /// with `a = p0 − 2·p1 + p2` and `b = 2·(p1 − p0)`.
    pub fn from_bezier<P>(curve: &QuadraticBezier<P>, degenerate_eps: F) -> Self
    where
        P: PointDot<Scalar = F>,
    {
        let av = curve.second_difference();
        let bv = curve.initial_velocity();
        let four = lit::<F>(4.0);

        let a = four * av.dot(&av);
        let b = four * av.dot(&bv);
        let c = bv.dot(&bv);
        ArcLength::new(a, b, c, degenerate_eps)
    }
}
