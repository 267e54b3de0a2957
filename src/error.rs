//! Error type shared by solvers, partitioners and the tour assembler.

use thiserror::Error as ThisError;

use crate::solver::Method;

/// Failure modes of a tour computation.
///
/// Size-mismatch warnings are not errors; they are attached to
/// [`SolveStats`](crate::models::SolveStats) instead.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum TourError {
    /// A solver or the assembler was handed zero points.
    #[error("cannot build a tour over zero points")]
    EmptyInput,

    /// An exhaustive solver was asked to search beyond its hard ceiling.
    #[error("{method} search refuses {size} points (hard limit {limit})")]
    InputSizeExceeded {
        /// Solver that refused the input.
        method: Method,
        /// Number of points it was given.
        size: usize,
        /// Largest size it accepts.
        limit: usize,
    },

    /// Heuristic start index does not name a point.
    #[error("start index {start} is out of range for {size} points")]
    InvalidStart {
        /// Requested start index.
        start: usize,
        /// Number of points.
        size: usize,
    },

    /// A point's latitude or longitude is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Global index of the offending point.
        index: usize,
    },

    /// A search finished without any complete tour of finite length.
    #[error("{0} search found no tour of finite length")]
    NoTourFound(Method),

    /// A partition does not cover every point exactly once.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A method name could not be parsed.
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    pub fn invalid_partition(message: impl Into<String>) -> Self {
        Self::InvalidPartition(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_exceeded_message() {
        let err = TourError::InputSizeExceeded {
            method: Method::Exact,
            size: 21,
            limit: 20,
        };
        assert_eq!(
            err.to_string(),
            "exact search refuses 21 points (hard limit 20)"
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            TourError::invalid_config("k must be positive").to_string(),
            "invalid configuration: k must be positive"
        );
        assert!(matches!(
            TourError::invalid_partition("x"),
            TourError::InvalidPartition(_)
        ));
    }

    #[test]
    fn test_non_finite_messages() {
        assert_eq!(
            TourError::NonFiniteCoordinate { index: 3 }.to_string(),
            "point 3 has a non-finite coordinate"
        );
        assert_eq!(
            TourError::NoTourFound(Method::Pruned).to_string(),
            "pruned search found no tour of finite length"
        );
    }
}
