//! Evenly spaced sampling of a [`QuadSpline`] for drawing.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use num_traits::One;

use crate::error::SplineError;
use crate::point::{PointDot, PointIndex, PointNorm};
use crate::quad_spline::{QuadSpline, Sample};
use crate::lit;

/// Iterator over `count` samples at `t_k = k / (count - 1)`, both curve ends included.
#[derive(Clone, Debug)]
pub struct Samples<'a, P>
where
    P: PointIndex,
{
    spline: &'a QuadSpline<P>,
    next: usize,
    count: usize,
}

impl<'a, P> Iterator for Samples<'a, P>
where
    P: PointIndex + PointNorm + PointDot,
{
    type Item = Result<Sample<P>, SplineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let k = self.next;
        self.next += 1;
        // the last sample is pinned to 1 so that it lands on the final key exactly
        let t = if k + 1 == self.count {
            P::Scalar::one()
        } else {
            lit::<P::Scalar>(k as f64) / lit::<P::Scalar>((self.count - 1) as f64)
        };
        Some(self.spline.point(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl<'a, P> ExactSizeIterator for Samples<'a, P> where P: PointIndex + PointNorm + PointDot {}

impl<'a, P> FusedIterator for Samples<'a, P> where P: PointIndex + PointNorm + PointDot {}

impl<P> QuadSpline<P>
where
    P: PointIndex + PointNorm + PointDot,
{
    /// Lazily sample the curve `count` times, evenly by arc length.
    pub fn samples(&self, count: usize) -> Result<Samples<'_, P>, SplineError> {
        if count < 2 {
            return Err(SplineError::TooFewSamples { count });
        }
        Ok(Samples { spline: self, next: 0, count })
    }

    /// `count` points evenly spaced by arc length, ready to be drawn as a line strip.
    pub fn polyline(&self, count: usize) -> Result<Vec<P>, SplineError> {
        self.samples(count)?.map(|s| s.map(|s| s.point)).collect()
    }

    /// Short line segments `(point, point + length · tangent)` at `count` evenly spaced samples.
    pub fn tangent_markers(&self, count: usize, length: P::Scalar) -> Result<Vec<(P, P)>, SplineError> {
        self.samples(count)?
            .map(|s| s.map(|s| (s.point, s.point + s.tangent * length)))
            .collect()
    }
}
