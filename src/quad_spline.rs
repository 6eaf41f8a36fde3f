//! Build and query a chain of quadratic Bézier segments by arc length.

use alloc::vec::Vec;
use core::slice;

use num_traits::{Float, One, Zero};

use crate::arc_length::{Convergence, Inversion, SegmentShape};
use crate::bounds::Bounds;
use crate::config::SplineConfig;
use crate::error::SplineError;
use crate::point::{midpoint, normalize_or_keep, PointDot, PointIndex, PointNorm};
use crate::quadratic_bezier::QuadraticBezier;
use crate::segment::Segment;
use crate::lit;

/// Position and unit tangent at a queried parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample<P> {
    pub point: P,
    /// Unit direction of travel; left unnormalized where the curve is (nearly) stationary.
    pub tangent: P,
    pub convergence: Convergence,
}

/// An immutable, arc-length parametrized chain of quadratic Bézier segments.
///
/// For `n` key points there are `n - 2` segments. Segment `i` uses key `i + 1` as
/// its control point and the midpoints to the neighbouring keys as its ends, except
/// that the first segment starts on the first key and the last one ends on the last key.
///
/// # Examples
/// ```rust
/// use arcline::{Point3, QuadSpline, SplineError};
///
/// let keys = [
///     Point3::new([0.0, 0.0, 0.0]),
///     Point3::new([2.0, 0.0, 0.0]),
///     Point3::new([2.0, 2.0, 0.0]),
///     Point3::new([4.0, 2.0, 1.0]),
/// ];
/// let spline = QuadSpline::build(&keys).unwrap();
///
/// let start = spline.point(0.0).unwrap();
/// let end = spline.point(1.0).unwrap();
/// assert_eq!(start.point, keys[0]);
/// assert_eq!(end.point, keys[3]);
///
/// assert_eq!(spline.point(1.5), Err(SplineError::ParameterOutOfRange));
/// assert_eq!(QuadSpline::build(&keys[..2]).unwrap_err(), SplineError::TooFewKeyPoints { count: 2 });
/// ```
#[derive(Clone, Debug)]
pub struct QuadSpline<P>
where
    P: PointIndex,
{
    keys: Vec<P>,
    segments: Vec<Segment<P>>,
    bounds: Bounds<P>,
    total_length: P::Scalar,
    config: SplineConfig,
}

impl<P> QuadSpline<P>
where
    P: PointIndex + PointNorm + PointDot,
{
    /// Build with the default [`SplineConfig`].
    pub fn build(keys: &[P]) -> Result<Self, SplineError> {
        Self::build_with(keys, SplineConfig::default())
    }

    pub fn build_with(keys: &[P], config: SplineConfig) -> Result<Self, SplineError> {
        config.validate()?;
        let count = keys.len();
        if count < 3 {
            return Err(SplineError::TooFewKeyPoints { count });
        }
        if let Some(index) = keys.iter().position(|k| (0..P::DIM).any(|dim| !k[dim].is_finite())) {
            return Err(SplineError::NonFiniteKeyPoint { index });
        }
        let bounds = Bounds::from_points(keys).ok_or(SplineError::TooFewKeyPoints { count })?;

        let degenerate_eps = lit::<P::Scalar>(config.degenerate_epsilon);
        let last = count - 3;
        let mut total_length = P::Scalar::zero();
        let mut segments = Vec::with_capacity(count - 2);
        for i in 0..=last {
            let start = if i == 0 { keys[i] } else { midpoint(keys[i], keys[i + 1]) };
            let end = if i == last { keys[i + 2] } else { midpoint(keys[i + 1], keys[i + 2]) };
            let segment = Segment::new(QuadraticBezier::new(start, keys[i + 1], end), degenerate_eps);
            if segment.shape() != SegmentShape::Regular {
                log::warn!("segment {} is degenerate, integrated as {:?}", i, segment.shape());
            }
            total_length = total_length + segment.length();
            segments.push(segment);
        }

        if !(total_length > P::Scalar::zero()) || !total_length.is_finite() {
            log::warn!("rejecting curve with total length {:?}", total_length);
            return Err(SplineError::DegenerateCurve);
        }

        let mut length_addup = P::Scalar::zero();
        for segment in segments.iter_mut() {
            length_addup = length_addup + segment.length();
            segment.percent = segment.length() / total_length;
            segment.percent_addup = length_addup / total_length;
        }
        // pin the last share so every t <= 1 is routed to a segment
        if let Some(segment) = segments.last_mut() {
            segment.percent_addup = P::Scalar::one();
        }

        log::debug!(
            "built spline: {} keys, {} segments, length {:?}",
            count,
            segments.len(),
            total_length
        );

        Ok(QuadSpline {
            keys: keys.to_vec(),
            segments,
            bounds,
            total_length,
            config,
        })
    }

    /// Build from a flat coordinate buffer `[x0, y0, z0, x1, ...]` holding `count` points.
    pub fn from_flat(coords: &[P::Scalar], count: usize) -> Result<Self, SplineError> {
        Self::from_flat_with(coords, count, SplineConfig::default())
    }

    pub fn from_flat_with(
        coords: &[P::Scalar],
        count: usize,
        config: SplineConfig,
    ) -> Result<Self, SplineError> {
        if count < 3 {
            return Err(SplineError::TooFewKeyPoints { count });
        }
        let needed = count.checked_mul(P::DIM);
        if P::DIM == 0 || needed.map_or(true, |needed| coords.len() < needed) {
            return Err(SplineError::MalformedCoordinates { len: coords.len(), dim: P::DIM });
        }

        let keys: Vec<P> = coords
            .chunks_exact(P::DIM)
            .take(count)
            .map(|chunk| {
                let mut key = P::default();
                for (dim, value) in chunk.iter().enumerate() {
                    key[dim] = *value;
                }
                key
            })
            .collect();
        Self::build_with(&keys, config)
    }

    /// Point and tangent at the arc-length fraction `t` in `[0, 1]`.
    ///
    /// `t <= 0` and `t >= 1` return the first and last key exactly, with the chord
    /// direction to the neighbouring key as tangent. Values outside `[0, 1]` are rejected.
    pub fn point(&self, t: P::Scalar) -> Result<Sample<P>, SplineError> {
        check_unit(t)?;
        let eps = lit::<P::Scalar>(self.config.tangent_epsilon);

        if t <= P::Scalar::zero() {
            return Ok(self.end_sample(self.keys[0], self.keys[1] - self.keys[0]));
        }
        let (index, inversion) = match self.route(t) {
            Some(index) => (index, self.invert(index, t)?),
            None => {
                let n = self.keys.len();
                return Ok(self.end_sample(self.keys[n - 1], self.keys[n - 1] - self.keys[n - 2]));
            }
        };

        let curve = &self.segments[index].curve;
        Ok(Sample {
            point: curve.eval(inversion.u),
            tangent: curve.tangent(inversion.u, eps),
            convergence: inversion.convergence,
        })
    }

    /// Point and tangent at the arc length `s` from the first key, `s` in `[0, total_length]`.
    pub fn point_at_length(&self, s: P::Scalar) -> Result<Sample<P>, SplineError> {
        if !(s >= P::Scalar::zero() && s <= self.total_length) {
            return Err(SplineError::ParameterOutOfRange);
        }
        self.point((s / self.total_length).min(P::Scalar::one()))
    }

    /// Distance actually traveled along the curve up to the point returned for `t`.
    ///
    /// Equals `t · total_length` up to the inversion tolerance.
    pub fn length_at(&self, t: P::Scalar) -> Result<P::Scalar, SplineError> {
        check_unit(t)?;
        if t <= P::Scalar::zero() {
            return Ok(P::Scalar::zero());
        }
        let index = match self.route(t) {
            Some(index) => index,
            None => return Ok(self.total_length),
        };
        let inversion = self.invert(index, t)?;
        let before = self.segments[..index]
            .iter()
            .fold(P::Scalar::zero(), |acc, s| acc + s.length());
        Ok(before + self.segments[index].arc.length_at(inversion.u))
    }

    /// Cached axis-aligned bounds of the key points.
    pub fn bounds(&self) -> Bounds<P> {
        self.bounds
    }

    pub fn keys(&self) -> &[P] {
        &self.keys
    }

    pub fn segments(&self) -> slice::Iter<'_, Segment<P>> {
        self.segments.iter()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn total_length(&self) -> P::Scalar {
        self.total_length
    }

    pub fn config(&self) -> &SplineConfig {
        &self.config
    }

    // first segment whose cumulative share reaches t, None at the far end
    fn route(&self, t: P::Scalar) -> Option<usize> {
        if t >= P::Scalar::one() {
            return None;
        }
        self.segments.iter().position(|s| s.percent_addup >= t)
    }

    fn invert(&self, index: usize, t: P::Scalar) -> Result<Inversion<P::Scalar>, SplineError> {
        let segment = &self.segments[index];
        let start = match index {
            0 => P::Scalar::zero(),
            _ => self.segments[index - 1].percent_addup,
        };
        // zero-length segments are never routed to, except through rounding at t = 1
        let local = if segment.percent > P::Scalar::zero() {
            ((t - start) / segment.percent).max(P::Scalar::zero()).min(P::Scalar::one())
        } else {
            P::Scalar::zero()
        };
        let target = local * segment.length();
        let inversion = segment.arc.invert(target, local, &self.config);
        log::trace!("t {:?} -> segment {} u {:?}", t, index, inversion.u);

        if let Convergence::Capped { iterations } = inversion.convergence {
            log::warn!(
                "length inversion capped on segment {} after {} iterations (u = {:?})",
                index,
                iterations,
                inversion.u
            );
            if self.config.strict_convergence {
                return Err(SplineError::NonConvergence { segment: index, iterations });
            }
        }
        Ok(inversion)
    }

    fn end_sample(&self, point: P, chord: P) -> Sample<P> {
        let eps = lit::<P::Scalar>(self.config.tangent_epsilon);
        Sample {
            point,
            tangent: normalize_or_keep(chord * lit::<P::Scalar>(2.0), eps),
            convergence: Convergence::Exact,
        }
    }
}

fn check_unit<F: Float>(t: F) -> Result<(), SplineError> {
    if t >= F::zero() && t <= F::one() {
        Ok(())
    } else {
        Err(SplineError::ParameterOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Point3, PointN};
    use alloc::vec;
    use approx::assert_relative_eq;

    fn reference_keys() -> [Point3; 7] {
        [
            Point3::new([-48.7134, -0.5356, 0.0]),
            Point3::new([0.9593, 0.7869, 10.8344]),
            Point3::new([-0.8523, -44.5942, 28.9085]),
            Point3::new([52.6940, -20.0053, 46.8857]),
            Point3::new([66.4766, 23.0054, 18.5315]),
            Point3::new([21.5014, 57.8555, 58.5114]),
            Point3::new([-15.8288, 42.1165, 23.2550]),
        ]
    }

    fn simpson<C: Fn(f64) -> f64>(f: C, n: usize) -> f64 {
        let h = 1.0 / n as f64;
        let mut sum = f(0.0) + f(1.0);
        for i in 1..n {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += w * f(i as f64 * h);
        }
        sum * h / 3.0
    }

    #[test]
    fn reference_curve_scenario() {
        let keys = reference_keys();
        let spline = QuadSpline::build(&keys).unwrap();
        assert_eq!(spline.segment_count(), 5);
        assert!(spline.total_length() > 0.0);

        let start = spline.point(0.0).unwrap();
        let end = spline.point(1.0).unwrap();
        assert_eq!(start.point, keys[0]);
        assert_eq!(end.point, keys[6]);

        // traveled length up to t = 0.5, measured on a fine polyline of samples
        let n = 2000;
        let pts: Vec<Point3> = (0..=n)
            .map(|k| spline.point(k as f64 / n as f64).unwrap().point)
            .collect();
        let chord = |a: usize, b: usize| -> f64 { (a..b).map(|k| (pts[k + 1] - pts[k]).norm()).sum() };
        let half = chord(0, n / 2);
        let total = chord(0, n);
        assert!((half / total - 0.5).abs() < 0.01);
        assert_relative_eq!(total, spline.total_length(), max_relative = 1e-3);
    }

    #[test]
    fn shares_are_monotone_and_reach_one() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        let mut prev = 0.0;
        let mut sum = 0.0;
        for segment in spline.segments() {
            assert!(segment.percent() > 0.0 && segment.percent() <= 1.0);
            assert!(segment.percent_addup() > prev);
            prev = segment.percent_addup();
            sum += segment.percent();
        }
        assert!((prev - 1.0).abs() < 1e-9);
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_contain_every_key() {
        let keys = reference_keys();
        let spline = QuadSpline::build(&keys).unwrap();
        let bounds = spline.bounds();
        for key in keys {
            assert!(bounds.contains(key));
        }
        assert_eq!(bounds.min(), Point3::new([-48.7134, -44.5942, 0.0]));
        assert_eq!(bounds.max(), Point3::new([66.4766, 57.8555, 58.5114]));
    }

    #[test]
    fn segment_lengths_match_numeric_integration() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        for segment in spline.segments() {
            let curve = segment.curve();
            let numeric = simpson(|u| curve.hodograph(u).norm(), 4000);
            assert!(((segment.length() - numeric) / numeric).abs() < 1e-4);
        }
    }

    #[test]
    fn control_points_follow_midpoint_construction() {
        let keys = reference_keys();
        let spline = QuadSpline::build(&keys).unwrap();
        let segments: Vec<_> = spline.segments().collect();
        assert_eq!(segments[0].curve().start(), keys[0]);
        assert_eq!(segments[4].curve().end(), keys[6]);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.curve().ctrl(), keys[i + 1]);
        }
        for pair in segments.windows(2) {
            // consecutive segments share their junction point
            assert_eq!(pair[0].curve().end(), pair[1].curve().start());
        }
        assert_eq!(segments[1].curve().start(), midpoint(keys[1], keys[2]));
    }

    #[test]
    fn uniform_speed_sampling() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        let n = 100;
        let pts: Vec<Point3> = (0..=n)
            .map(|k| spline.point(k as f64 / n as f64).unwrap().point)
            .collect();
        let gaps: Vec<f64> = pts.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        let var = gaps.iter().map(|g| (g - mean) * (g - mean)).sum::<f64>() / gaps.len() as f64;
        assert!(var.sqrt() / mean < 0.1);

        // sampling the raw natural parameter instead is visibly uneven
        let mut raw = Vec::new();
        for segment in spline.segments() {
            for k in 0..20 {
                raw.push(segment.curve().eval(k as f64 / 20.0));
            }
        }
        let raw_gaps: Vec<f64> = raw.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
        let raw_mean = raw_gaps.iter().sum::<f64>() / raw_gaps.len() as f64;
        let raw_var =
            raw_gaps.iter().map(|g| (g - raw_mean) * (g - raw_mean)).sum::<f64>() / raw_gaps.len() as f64;
        assert!(raw_var.sqrt() / raw_mean > var.sqrt() / mean);
    }

    #[test]
    fn tangents_are_unit_length() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        for k in 0..=200 {
            let sample = spline.point(k as f64 / 200.0).unwrap();
            assert!((sample.tangent.norm() - 1.0).abs() < 1e-4);
            assert!(sample.convergence.is_converged());
        }
    }

    #[test]
    fn end_tangents_follow_the_key_chords() {
        let keys = reference_keys();
        let spline = QuadSpline::build(&keys).unwrap();
        let first = spline.point(0.0).unwrap().tangent;
        let chord = keys[1] - keys[0];
        assert!((first - chord * (1.0 / chord.norm())).norm() < 1e-12);

        // just inside the curve the tangent agrees with the boundary value
        let near = spline.point(1e-9).unwrap().tangent;
        assert!((near - first).norm() < 1e-4);
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        for t in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = spline.point(t).unwrap_err();
            assert_eq!(err, SplineError::ParameterOutOfRange);
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(spline.point_at_length(-1.0).is_err());
        assert!(spline.point_at_length(spline.total_length() * 1.5).is_err());
    }

    #[test]
    fn rejects_too_few_keys() {
        let keys = reference_keys();
        let err = QuadSpline::build(&keys[..2]).unwrap_err();
        assert_eq!(err, SplineError::TooFewKeyPoints { count: 2 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(QuadSpline::<Point3>::build(&[]).is_err());
    }

    #[test]
    fn rejects_zero_length_curve() {
        let p = Point3::new([1.0, 1.0, 1.0]);
        assert_eq!(QuadSpline::build(&[p, p, p, p]).unwrap_err(), SplineError::DegenerateCurve);
    }

    #[test]
    fn rejects_non_finite_keys() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut keys = reference_keys();
            keys[1] = Point3::new([bad, 0.0, 0.0]);
            let err = QuadSpline::build(&keys).unwrap_err();
            assert_eq!(err, SplineError::NonFiniteKeyPoint { index: 1 });
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }

        let mut flat: Vec<f64> = reference_keys().iter().flat_map(|k| k.into_array()).collect();
        flat[14] = f64::NAN;
        assert_eq!(
            QuadSpline::<Point3>::from_flat(&flat, 7).unwrap_err(),
            SplineError::NonFiniteKeyPoint { index: 4 }
        );
    }

    #[test]
    fn flat_buffer_input() {
        let keys = reference_keys();
        let flat: Vec<f64> = keys.iter().flat_map(|k| k.into_array()).collect();
        let spline = QuadSpline::<Point3>::from_flat(&flat, 7).unwrap();
        assert_eq!(spline.keys(), &keys[..]);

        // a prefix of the buffer is fine
        let short = QuadSpline::<Point3>::from_flat(&flat, 4).unwrap();
        assert_eq!(short.segment_count(), 2);

        assert_eq!(
            QuadSpline::<Point3>::from_flat(&flat[..20], 7).unwrap_err(),
            SplineError::MalformedCoordinates { len: 20, dim: 3 }
        );
        assert_eq!(
            QuadSpline::<Point3>::from_flat(&flat, 2).unwrap_err(),
            SplineError::TooFewKeyPoints { count: 2 }
        );
    }

    #[test]
    fn length_and_parameter_agree() {
        let spline = QuadSpline::build(&reference_keys()).unwrap();
        let total = spline.total_length();
        for k in 0..=10 {
            let t = k as f64 / 10.0;
            let traveled = spline.length_at(t).unwrap();
            assert!((traveled - t * total).abs() < 1e-5 * total);

            let by_length = spline.point_at_length(t * total).unwrap();
            let by_fraction = spline.point(t).unwrap();
            assert!((by_length.point - by_fraction.point).norm() < 1e-9);
        }
    }

    #[test]
    fn straight_line_keys() {
        let keys = vec![
            PointN::new([0.0, 0.0]),
            PointN::new([1.0, 0.0]),
            PointN::new([2.0, 0.0]),
            PointN::new([3.0, 0.0]),
        ];
        let spline = QuadSpline::build(&keys).unwrap();
        assert!(spline.segments().all(|s| s.shape() == SegmentShape::Collinear));
        assert_relative_eq!(spline.total_length(), 3.0, max_relative = 1e-12);
        for k in 0..=10 {
            let t = k as f64 / 10.0;
            let sample = spline.point(t).unwrap();
            assert!((sample.point - PointN::new([3.0 * t, 0.0])).norm() < 1e-6);
            assert!((sample.tangent - PointN::new([1.0, 0.0])).norm() < 1e-9);
        }
    }

    #[test]
    fn doubling_back_keys() {
        // the middle segment reverses on its own line
        let keys = [
            PointN::new([0.0, 0.0]),
            PointN::new([4.0, 0.0]),
            PointN::new([2.0, 0.0]),
            PointN::new([2.0, 3.0]),
        ];
        let spline = QuadSpline::build(&keys).unwrap();
        assert!(spline.total_length().is_finite());
        for k in 0..=50 {
            let sample = spline.point(k as f64 / 50.0).unwrap();
            assert!(sample.point[0].is_finite() && sample.point[1].is_finite());
        }
        assert_eq!(spline.point(1.0).unwrap().point, keys[3]);
    }

    #[test]
    fn strict_mode_reports_non_convergence() {
        let config = SplineConfig::default()
            .with_max_iterations(1)
            .with_tolerance(1e-15)
            .with_strict_convergence(true);
        let spline = QuadSpline::build_with(&reference_keys(), config).unwrap();
        let err = spline.point(0.37).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericalNonConvergence);

        let relaxed = QuadSpline::build_with(&reference_keys(), config.with_strict_convergence(false)).unwrap();
        let sample = relaxed.point(0.37).unwrap();
        assert!(!sample.convergence.is_converged());
    }
}
