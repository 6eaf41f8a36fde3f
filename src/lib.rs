//! Arc-length parametrized chains of quadratic Bézier curves.
//!
//! A [`QuadSpline`] is threaded through an ordered list of key points: every
//! interior key becomes the control point of one quadratic segment whose ends
//! sit on the midpoints to its neighbours (the first and last segment end on
//! the first and last key instead). The result is C¹-continuous and passes
//! exactly through both end keys.
//!
//! Queries take a global parameter `t` in `[0, 1]` that is a fraction of the
//! total arc length, so sampling at uniformly spaced `t` gives (approximately)
//! uniformly spaced points. Each segment length is known in closed form and
//! inverted per query with Newton-Raphson.
//!
//! ```rust
//! use arcline::{Point3, QuadSpline};
//!
//! let keys = [
//!     Point3::new([0.0, 0.0, 0.0]),
//!     Point3::new([1.0, 2.0, 0.0]),
//!     Point3::new([3.0, 2.0, 1.0]),
//!     Point3::new([4.0, 0.0, 1.0]),
//! ];
//! let spline = QuadSpline::build(&keys).unwrap();
//! assert_eq!(spline.segment_count(), 2);
//!
//! let sample = spline.point(0.5).unwrap();
//! # let _ = sample.tangent;
//! assert!(spline.bounds().contains(sample.point));
//! ```
#![no_std]

extern crate alloc;

use num_traits::{Float, NumCast};

pub mod arc_length;
pub mod bounds;
pub mod config;
pub mod engine;
pub mod error;
pub mod point;
pub mod point_generic;
pub mod quad_spline;
pub mod quadratic_bezier;
pub mod roots;
pub mod sample;
pub mod segment;

pub use arc_length::{ArcLength, Convergence, Inversion, SegmentShape};
pub use bounds::Bounds;
pub use config::SplineConfig;
pub use engine::{EngineState, SplineEngine};
pub use error::{ErrorKind, SplineError};
pub use point::{Point, PointDot, PointIndex, PointNorm};
pub use point_generic::{Point3, PointN};
pub use quad_spline::{QuadSpline, Sample};
pub use quadratic_bezier::QuadraticBezier;
pub use sample::Samples;
pub use segment::Segment;

pub(crate) use tinyvec::ArrayVec;

/// Absolute tolerance used by the tests of this crate.
pub const EPSILON: f64 = 1e-10;

/// Convert a native literal into the scalar type of a point.
#[inline]
pub(crate) fn lit<F: Float>(value: f64) -> F {
    <F as NumCast>::from(value).unwrap_or_else(F::nan)
}
