//! This module contains clustering algorithms and their common contract.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/algorithms_test.rs"]
mod algorithms_test;

use crate::models::{DissimilarityMetric, Matrix};
use crate::utils::{ClusteringError, ClusteringResult, Float, compare_floats};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

pub mod affinity_propagation;
pub mod gng;
pub mod kmedoids;
pub mod neural_gas;
pub mod threshold;
pub mod ward;

/// A common interface implemented by every clustering algorithm.
pub trait ClusteringAlgorithm {
    /// Runs the algorithm on data rows till completion, the previous result is replaced.
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()>;

    /// Returns clusters as lists of row indices. Returns an empty list if called before `cluster`.
    fn get_clusters(&self) -> Vec<Vec<usize>>;

    /// Returns a representative vector per cluster (row `k` represents cluster `k`) or `None` if
    /// algorithm has not been run yet.
    fn get_prototypes(&self) -> ClusteringResult<Option<Matrix>>;

    /// Toggles progress reporting. It has no effect on the result.
    fn set_verbose(&mut self, verbose: bool);

    /// Returns how the last run has terminated, if algorithm is iterative.
    fn convergence(&self) -> Option<Convergence> {
        None
    }
}

/// Specifies how an iterative algorithm has terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// A fixed point or a stopping criterion was reached.
    Converged {
        /// Amount of iterations done.
        iterations: usize,
    },
    /// Iteration limit was reached without a detected fixed point.
    Exhausted {
        /// Amount of iterations done.
        iterations: usize,
    },
    /// Computation was stopped by the environment quota.
    Interrupted {
        /// Amount of iterations done.
        iterations: usize,
    },
}

impl Convergence {
    /// Returns amount of iterations done.
    pub fn iterations(&self) -> usize {
        match self {
            Convergence::Converged { iterations }
            | Convergence::Exhausted { iterations }
            | Convergence::Interrupted { iterations } => *iterations,
        }
    }

    /// Returns true if algorithm reached its fixed point.
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged { .. })
    }
}

impl Display for Convergence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Convergence::Converged { iterations } => write!(f, "converged after {iterations} iterations"),
            Convergence::Exhausted { iterations } => write!(f, "no convergence after {iterations} iterations"),
            Convergence::Interrupted { iterations } => write!(f, "interrupted after {iterations} iterations"),
        }
    }
}

/// Checks that data has at least `min_rows` rows and at least one column.
pub(crate) fn validate_data(data: &Matrix, min_rows: usize) -> ClusteringResult<()> {
    if data.rows() == 0 {
        return Err(ClusteringError::InvalidInput("data matrix has no rows".to_string()));
    }

    if data.cols() == 0 {
        return Err(ClusteringError::InvalidInput("data matrix has no columns".to_string()));
    }

    if data.rows() < min_rows {
        return Err(ClusteringError::InvalidInput(format!(
            "data matrix has {} rows, at least {min_rows} required",
            data.rows()
        )));
    }

    Ok(())
}

/// Checks that parameter value lies in given range where both bounds are exclusive.
pub(crate) fn validate_open_range(name: &str, value: Float, min: Float, max: Float) -> ClusteringResult<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(ClusteringError::InvalidInput(format!("{name} must be in ({min}, {max}), got {value}")))
    }
}

/// Returns an index of the prototype row nearest to the given vector, the lowest index wins on ties.
pub(crate) fn find_nearest(
    vector: &[Float],
    prototypes: &Matrix,
    metric: &(dyn DissimilarityMetric + Send + Sync),
) -> Option<usize> {
    (0..prototypes.rows())
        .map(|idx| (idx, metric.dissimilarity(vector, prototypes.row(idx))))
        .min_by(|(a_idx, a), (b_idx, b)| match compare_floats(*a, *b) {
            Ordering::Equal => a_idx.cmp(b_idx),
            other => other,
        })
        .map(|(idx, _)| idx)
}

/// Moves vector toward target by given fraction of the difference.
pub(crate) fn move_toward(vector: &mut [Float], target: &[Float], fraction: Float) {
    debug_assert_eq!(vector.len(), target.len());
    vector.iter_mut().zip(target.iter()).for_each(|(value, target)| *value += fraction * (target - *value));
}
