//! Axis-aligned bounding boxes.

use alloc::vec::Vec;

use num_traits::Float;

use crate::lit;
use crate::point::PointIndex;

/// Axis-aligned box spanned by a `min` and a `max` corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds<P> {
    min: P,
    max: P,
}

impl<P> Bounds<P>
where
    P: PointIndex,
{
    /// Box from two opposite corners, reordered per axis.
    pub fn new(a: P, b: P) -> Self {
        let mut min = a;
        let mut max = a;
        for dim in 0..P::DIM {
            min[dim] = a[dim].min(b[dim]);
            max[dim] = a[dim].max(b[dim]);
        }
        Bounds { min, max }
    }

    /// Smallest box containing all `points`. Returns None for an empty slice.
    pub fn from_points(points: &[P]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds { min: *first, max: *first };
        for point in rest {
            bounds.include(*point);
        }
        Some(bounds)
    }

    pub fn min(&self) -> P {
        self.min
    }

    pub fn max(&self) -> P {
        self.max
    }

    /// Grow the box so it contains `point`.
    pub fn include(&mut self, point: P) {
        for dim in 0..P::DIM {
            let value = point[dim];
            if value < self.min[dim] {
                self.min[dim] = value;
            }
            if value > self.max[dim] {
                self.max[dim] = value;
            }
        }
    }

    /// True if `point` lies inside or on the box, component-wise.
    pub fn contains(&self, point: P) -> bool {
        (0..P::DIM).all(|dim| point[dim] >= self.min[dim] && point[dim] <= self.max[dim])
    }

    pub fn center(&self) -> P {
        (self.min + self.max) * lit::<P::Scalar>(0.5)
    }

    /// Edge lengths per axis.
    pub fn extent(&self) -> P {
        self.max - self.min
    }

    /// All `2^DIM` corners. Bit `i` of a corner's index selects `max` on axis `i`.
    pub fn corners(&self) -> Vec<P> {
        (0..1usize << P::DIM)
            .map(|mask| {
                let mut corner = self.min;
                for dim in 0..P::DIM {
                    if mask & (1 << dim) != 0 {
                        corner[dim] = self.max[dim];
                    }
                }
                corner
            })
            .collect()
    }

    /// Index pairs into [`corners`](Self::corners) forming the wireframe edges of the box.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(P::DIM << P::DIM.saturating_sub(1));
        for corner in 0..1usize << P::DIM {
            for dim in 0..P::DIM {
                let other = corner | (1 << dim);
                if other != corner {
                    edges.push((corner, other));
                }
            }
        }
        edges
    }
}
