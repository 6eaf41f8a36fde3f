use num_traits::Zero;

use crate::arc_length::{ArcLength, SegmentShape};
use crate::point::{Point, PointDot};
use crate::quadratic_bezier::QuadraticBezier;

/// One quadratic piece of a [`QuadSpline`](crate::QuadSpline) with its cached length data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment<P: Point> {
    pub(crate) curve: QuadraticBezier<P>,
    pub(crate) arc: ArcLength<P::Scalar>,
    /// Share of the total curve length.
    pub(crate) percent: P::Scalar,
    /// Cumulative share up to and including this segment.
    pub(crate) percent_addup: P::Scalar,
}

impl<P> Segment<P>
where
    P: PointDot,
{
    pub(crate) fn new(curve: QuadraticBezier<P>, degenerate_eps: P::Scalar) -> Self {
        Segment {
            curve,
            arc: ArcLength::from_bezier(&curve, degenerate_eps),
            percent: P::Scalar::zero(),
            percent_addup: P::Scalar::zero(),
        }
    }

    pub fn curve(&self) -> &QuadraticBezier<P> {
        &self.curve
    }

    pub fn arc_length(&self) -> &ArcLength<P::Scalar> {
        &self.arc
    }

    pub fn shape(&self) -> SegmentShape {
        self.arc.shape()
    }

    pub fn length(&self) -> P::Scalar {
        self.arc.total()
    }

    pub fn percent(&self) -> P::Scalar {
        self.percent
    }

    pub fn percent_addup(&self) -> P::Scalar {
        self.percent_addup
    }
}
