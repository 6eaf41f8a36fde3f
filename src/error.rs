use core::fmt;

/// Broad category of a [`SplineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Build input the curve cannot be constructed from.
    InvalidInput,
    /// Query argument outside the contract, or a curve with no usable length.
    InvalidArgument,
    /// The length inversion hit its iteration cap.
    NumericalNonConvergence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineError {
    /// Fewer than three key points.
    TooFewKeyPoints { count: usize },
    /// A flat coordinate buffer too short for the requested point count.
    MalformedCoordinates { len: usize, dim: usize },
    /// A key point with a NaN or infinite coordinate.
    NonFiniteKeyPoint { index: usize },
    InvalidConfig,
    /// Polyline sampling needs at least two samples.
    TooFewSamples { count: usize },
    /// A global parameter outside `[0, 1]` (or NaN).
    ParameterOutOfRange,
    /// All key points coincide, so there is no length to parametrize by.
    DegenerateCurve,
    /// Query against an engine that holds no curve.
    NotBuilt,
    NonConvergence { segment: usize, iterations: usize },
}

impl SplineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SplineError::TooFewKeyPoints { .. }
            | SplineError::MalformedCoordinates { .. }
            | SplineError::NonFiniteKeyPoint { .. }
            | SplineError::InvalidConfig
            | SplineError::TooFewSamples { .. } => ErrorKind::InvalidInput,
            SplineError::ParameterOutOfRange
            | SplineError::DegenerateCurve
            | SplineError::NotBuilt => ErrorKind::InvalidArgument,
            SplineError::NonConvergence { .. } => ErrorKind::NumericalNonConvergence,
        }
    }
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::TooFewKeyPoints { count } => {
                write!(f, "at least 3 key points are required, got {}", count)
            }
            SplineError::MalformedCoordinates { len, dim } => write!(
                f,
                "coordinate buffer of length {} does not hold the requested {}-dimensional points",
                len, dim
            ),
            SplineError::NonFiniteKeyPoint { index } => {
                write!(f, "key point {} has a non-finite coordinate", index)
            }
            SplineError::InvalidConfig => write!(f, "tolerances must be positive and finite"),
            SplineError::TooFewSamples { count } => {
                write!(f, "at least 2 samples are required, got {}", count)
            }
            SplineError::ParameterOutOfRange => write!(f, "parameter must lie in [0, 1]"),
            SplineError::DegenerateCurve => write!(f, "curve has zero length"),
            SplineError::NotBuilt => write!(f, "no curve has been built"),
            SplineError::NonConvergence { segment, iterations } => write!(
                f,
                "length inversion on segment {} did not converge within {} iterations",
                segment, iterations
            ),
        }
    }
}

impl core::error::Error for SplineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kinds_follow_the_error_model() {
        assert_eq!(SplineError::TooFewKeyPoints { count: 2 }.kind(), ErrorKind::InvalidInput);
        assert_eq!(SplineError::NonFiniteKeyPoint { index: 1 }.kind(), ErrorKind::InvalidInput);
        assert_eq!(SplineError::ParameterOutOfRange.kind(), ErrorKind::InvalidArgument);
        assert_eq!(SplineError::DegenerateCurve.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            SplineError::NonConvergence { segment: 1, iterations: 50 }.kind(),
            ErrorKind::NumericalNonConvergence
        );
    }

    #[test]
    fn display_names_the_count() {
        let msg = SplineError::TooFewKeyPoints { count: 2 }.to_string();
        assert!(msg.contains("got 2"));
    }
}
