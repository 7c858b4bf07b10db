use std::fmt::{Display, Formatter};

/// An error which can be returned by clustering algorithms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClusteringError {
    /// Input data or parameters are not acceptable: degenerate matrix shape, parameter is out of
    /// range, requested amount of centers or units exceeds amount of rows.
    InvalidInput(String),

    /// Operation is not defined for the algorithm, e.g. prototypes of threshold clustering.
    UnsupportedOperation(String),

    /// Internal state is broken: this is a logic defect, not a data problem.
    InvariantViolation(String),
}

/// A type alias for result type with `ClusteringError`.
pub type ClusteringResult<T> = Result<T, ClusteringError>;

impl ClusteringError {
    /// Returns true if error is caused by invalid input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ClusteringError::InvalidInput(_))
    }
}

impl Display for ClusteringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusteringError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ClusteringError::UnsupportedOperation(msg) => write!(f, "unsupported operation: {msg}"),
            ClusteringError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for ClusteringError {}
