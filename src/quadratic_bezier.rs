use num_traits::{One, Zero};

use super::point::{normalize_or_keep, Point, PointIndex, PointNorm};
use super::roots::root_linear;
use super::{lit, ArrayVec, Bounds};

/// Quadratic Bézier curve `B(u) = (1-u)²·start + 2(1-u)u·ctrl + u²·end` for `u` in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezier<P> {
    pub(crate) start: P,
    pub(crate) ctrl: P,
    pub(crate) end: P,
}

impl<P> QuadraticBezier<P>
where
    P: Point,
{
    pub fn new(start: P, ctrl: P, end: P) -> Self {
        QuadraticBezier { start, ctrl, end }
    }

    pub fn start(&self) -> P {
        self.start
    }

    pub fn ctrl(&self) -> P {
        self.ctrl
    }

    pub fn end(&self) -> P {
        self.end
    }

    /// Evaluate the curve at `u` using the Bernstein form.
    pub fn eval(&self, u: P::Scalar) -> P {
        let one = P::Scalar::one();
        let two = lit::<P::Scalar>(2.0);
        let one_u = one - u;

        self.start * (one_u * one_u) + self.ctrl * (two * one_u * u) + self.end * (u * u)
    }

    /// Evaluate the curve at `u` using the numerically stable De Casteljau algorithm
    pub fn eval_casteljau(&self, u: P::Scalar) -> P {
        // unrolled de casteljau algorithm
        // _1ab is the first iteration from first (a) to second (b) control point and so on
        let ctrl_1ab = self.start + (self.ctrl - self.start) * u;
        let ctrl_1bc = self.ctrl + (self.end - self.ctrl) * u;
        // second iteration, final point on the curve
        ctrl_1ab + (ctrl_1bc - ctrl_1ab) * u
    }

    /// First derivative `B'(u) = 2(u-1)·start + (2-4u)·ctrl + 2u·end`.
    pub fn hodograph(&self, u: P::Scalar) -> P {
        let two = lit::<P::Scalar>(2.0);
        let four = lit::<P::Scalar>(4.0);
        self.start * (two * (u - P::Scalar::one())) + self.ctrl * (two - four * u) + self.end * (two * u)
    }

    /// Second difference `start - 2·ctrl + end`; half the (constant) second derivative.
    pub(crate) fn second_difference(&self) -> P {
        self.start - self.ctrl * lit::<P::Scalar>(2.0) + self.end
    }

    /// First difference scaled to the derivative at `u = 0`, i.e. `2·(ctrl - start)`.
    pub(crate) fn initial_velocity(&self) -> P {
        (self.ctrl - self.start) * lit::<P::Scalar>(2.0)
    }
}

impl<P> QuadraticBezier<P>
where
    P: PointNorm,
{
    /// Unit tangent at `u`. Derivatives with squared length below `eps` are returned as they are.
    pub fn tangent(&self, u: P::Scalar, eps: P::Scalar) -> P {
        normalize_or_keep(self.hodograph(u), eps)
    }

    /// Approximates the arc length of the curve by flattening it with straight line segments.
    pub fn arclen(&self, nsteps: usize) -> P::Scalar {
        let nsteps = nsteps.max(1);
        let stepsize = P::Scalar::one() / lit::<P::Scalar>(nsteps as f64);
        let mut arclen = P::Scalar::zero();
        let mut prev = self.start;
        for i in 1..=nsteps {
            let u = if i == nsteps { P::Scalar::one() } else { stepsize * lit::<P::Scalar>(i as f64) };
            let p = self.eval_casteljau(u);
            arclen = arclen + (p - prev).norm();
            prev = p;
        }
        arclen
    }
}

impl<P> QuadraticBezier<P>
where
    P: PointIndex,
{
    /// Bounding box of the three control points, which also contains the curve.
    pub fn control_bounds(&self) -> Bounds<P> {
        Bounds::from_points(&[self.start, self.ctrl, self.end]).unwrap_or_else(|| Bounds::new(self.start, self.start))
    }

    /// Tight bounding box: end points plus the interior extremum of every axis.
    pub fn bounding_box(&self) -> Bounds<P> {
        let mut bounds = Bounds::new(self.start, self.start);
        bounds.include(self.end);

        // B'(u) per axis is linear: 2·a·u + b with a = second difference, b = 2·(ctrl - start)
        let a = self.second_difference();
        let b = self.initial_velocity();
        let two = lit::<P::Scalar>(2.0);
        for dim in 0..P::DIM {
            let roots: ArrayVec<[P::Scalar; 1]> = root_linear(two * a[dim], b[dim]);
            for u in roots {
                if u > P::Scalar::zero() && u < P::Scalar::one() {
                    bounds.include(self.eval(u));
                }
            }
        }
        bounds
    }
}
