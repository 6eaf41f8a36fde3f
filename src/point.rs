use core::fmt::Debug;
use core::ops::{Add, Index, IndexMut, Mul, Sub};

use num_traits::{Float, One};

use crate::lit;

/// Trait defined over generic points P which themselves are generic over their scalar.
/// Many libraries already provide Point-types and the mathematical operations
/// that we need for working with curves, so that implementing methods requires mostly wrapping.
/// Keeping the trait as minimal as possible to make integration with other libraries easy
pub trait Point:
    Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<<Self as Point>::Scalar, Output = Self>
    + Copy
    + PartialEq
    + Default
    + Debug
{
    type Scalar: Float + Default + Debug;

    /// Number of components (e.g. 3 for x, y, z)
    const DIM: usize;
}

/// Component access by axis index, e.g. [0, 1, 2] -> [x, y, z]
pub trait PointIndex: Point + Index<usize, Output = <Self as Point>::Scalar> + IndexMut<usize> {}

impl<P> PointIndex for P where
    P: Point + Index<usize, Output = <P as Point>::Scalar> + IndexMut<usize>
{
}

pub trait PointNorm: Point {
    /// Returns the squared L2 norm of the point interpreted as a vector
    fn squared_norm(&self) -> Self::Scalar;

    /// Returns the L2 norm of the point interpreted as a vector
    fn norm(&self) -> Self::Scalar {
        self.squared_norm().sqrt()
    }
}

pub trait PointDot: Point {
    fn dot(&self, other: &Self) -> Self::Scalar;
}

/// Point halfway between `a` and `b`.
#[inline]
pub fn midpoint<P: Point>(a: P, b: P) -> P {
    (a + b) * lit::<P::Scalar>(0.5)
}

/// Scale `v` to unit length, or return it untouched if its squared length is below `eps`.
#[inline]
pub fn normalize_or_keep<P: PointNorm>(v: P, eps: P::Scalar) -> P {
    let sqr = v.squared_norm();
    if sqr < eps {
        return v;
    }
    v * (P::Scalar::one() / sqr.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, EPSILON};

    #[test]
    fn midpoint_is_halfway() {
        let a = Point3::new([-1.0, 2.0, 4.0]);
        let b = Point3::new([3.0, 2.0, -4.0]);
        let m = midpoint(a, b);
        assert!((m - Point3::new([1.0, 2.0, 0.0])).squared_norm() < EPSILON);
    }

    #[test]
    fn normalize_keeps_tiny_vectors() {
        let tiny = Point3::new([1e-5, 0.0, 0.0]);
        assert_eq!(normalize_or_keep(tiny, 1e-7), tiny);

        let v = normalize_or_keep(Point3::new([3.0, 0.0, 4.0]), 1e-7);
        assert!((v.norm() - 1.0).abs() < EPSILON);
        assert!((v[0] - 0.6).abs() < EPSILON);
        assert!((v[2] - 0.8).abs() < EPSILON);
    }
}
