//! A rebuildable holder for the current curve.

use alloc::sync::Arc;

use crate::bounds::Bounds;
use crate::config::SplineConfig;
use crate::error::SplineError;
use crate::point::{PointDot, PointIndex, PointNorm};
use crate::quad_spline::{QuadSpline, Sample};

/// Whether a [`SplineEngine`] currently holds a curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Unbuilt,
    Built,
}

/// Owns at most one built [`QuadSpline`] and answers queries against it.
///
/// Every build discards the previous curve first. A failed build therefore leaves
/// the engine unbuilt. Snapshots handed out earlier stay valid, since the built
/// curve itself is never mutated.
///
/// # Examples
/// ```rust
/// use arcline::{EngineState, Point3, SplineEngine, SplineError};
///
/// let mut engine = SplineEngine::<Point3>::new();
/// assert_eq!(engine.point(0.5).unwrap_err(), SplineError::NotBuilt);
///
/// engine
///     .build(&[
///         Point3::new([0.0, 0.0, 0.0]),
///         Point3::new([1.0, 2.0, 0.0]),
///         Point3::new([3.0, 2.0, 1.0]),
///     ])
///     .unwrap();
/// assert_eq!(engine.state(), EngineState::Built);
/// assert!(engine.point(0.5).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SplineEngine<P>
where
    P: PointIndex,
{
    config: SplineConfig,
    current: Option<Arc<QuadSpline<P>>>,
}

impl<P> Default for SplineEngine<P>
where
    P: PointIndex + PointNorm + PointDot,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SplineEngine<P>
where
    P: PointIndex + PointNorm + PointDot,
{
    pub fn new() -> Self {
        SplineEngine {
            config: SplineConfig::default(),
            current: None,
        }
    }

    /// Engine whose builds use `config`. Rejected up front if the config is invalid.
    pub fn with_config(config: SplineConfig) -> Result<Self, SplineError> {
        config.validate()?;
        Ok(SplineEngine { config, current: None })
    }

    pub fn config(&self) -> &SplineConfig {
        &self.config
    }

    /// Replace the current curve with one built from `keys`.
    pub fn build(&mut self, keys: &[P]) -> Result<Arc<QuadSpline<P>>, SplineError> {
        self.clear();
        let spline = Arc::new(QuadSpline::build_with(keys, self.config)?);
        self.current = Some(Arc::clone(&spline));
        Ok(spline)
    }

    /// Replace the current curve with one built from a flat coordinate buffer.
    pub fn build_flat(
        &mut self,
        coords: &[P::Scalar],
        count: usize,
    ) -> Result<Arc<QuadSpline<P>>, SplineError> {
        self.clear();
        let spline = Arc::new(QuadSpline::from_flat_with(coords, count, self.config)?);
        self.current = Some(Arc::clone(&spline));
        Ok(spline)
    }

    pub fn state(&self) -> EngineState {
        match self.current {
            Some(_) => EngineState::Built,
            None => EngineState::Unbuilt,
        }
    }

    pub fn is_built(&self) -> bool {
        self.current.is_some()
    }

    /// Drop the current curve.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            log::debug!("discarding built spline");
        }
    }

    /// Shared handle to the current curve.
    pub fn snapshot(&self) -> Option<Arc<QuadSpline<P>>> {
        self.current.clone()
    }

    pub fn point(&self, t: P::Scalar) -> Result<Sample<P>, SplineError> {
        self.spline()?.point(t)
    }

    pub fn bounds(&self) -> Result<Bounds<P>, SplineError> {
        Ok(self.spline()?.bounds())
    }

    fn spline(&self) -> Result<&QuadSpline<P>, SplineError> {
        self.current.as_deref().ok_or(SplineError::NotBuilt)
    }
}
