#[cfg(test)]
#[path = "../../tests/unit/models/metric_test.rs"]
mod metric_test;

use crate::models::Matrix;
use crate::utils::Float;

/// Specifies a dissimilarity between two feature vectors: non-negative, symmetric and zero on
/// identical inputs.
pub trait DissimilarityMetric {
    /// Returns dissimilarity between two vectors of the same length.
    fn dissimilarity(&self, a: &[Float], b: &[Float]) -> Float;
}

/// A sum of squared differences.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredErrorMetric;

impl DissimilarityMetric for SquaredErrorMetric {
    fn dissimilarity(&self, a: &[Float], b: &[Float]) -> Float {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum()
    }
}

/// A sum of absolute differences.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsoluteErrorMetric;

impl DissimilarityMetric for AbsoluteErrorMetric {
    fn dissimilarity(&self, a: &[Float], b: &[Float]) -> Float {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// Creates a symmetric square matrix of pairwise dissimilarities between data rows with zero diagonal.
pub fn create_dissimilarity_matrix(data: &Matrix, metric: &(dyn DissimilarityMetric + Send + Sync)) -> Matrix {
    let size = data.rows();
    let mut matrix = Matrix::new(size, size);

    for i in 0..size {
        for j in (i + 1)..size {
            let value = metric.dissimilarity(data.row(i), data.row(j));
            matrix.set(i, j, value);
            matrix.set(j, i, value);
        }
    }

    matrix
}
