#[cfg(test)]
#[path = "../../../tests/unit/algorithms/threshold/calibration_test.rs"]
mod calibration_test;

use crate::models::Matrix;
use crate::utils::Float;

/// A similarity level used to calibrate ECAST threshold.
const CALIBRATION_LEVEL: Float = 0.5;

/// Converts dissimilarities into similarities using `1 - d / d_max`. When all dissimilarities are
/// zero, all similarities are one.
pub fn create_normalized_similarities(dissimilarities: &Matrix) -> Matrix {
    let size = dissimilarities.rows();
    let max = (0..size)
        .flat_map(|i| (0..size).map(move |j| (i, j)))
        .map(|(i, j)| dissimilarities.get(i, j))
        .fold(0., Float::max);

    Matrix::from_fn(size, |i, j| if max > 0. { (1. - dissimilarities.get(i, j) / max).clamp(0., 1.) } else { 1. })
}

/// Converts dissimilarities into similarities using `exp(-d)`.
pub fn create_exponential_similarities(dissimilarities: &Matrix) -> Matrix {
    Matrix::from_fn(dissimilarities.rows(), |i, j| (-dissimilarities.get(i, j)).exp())
}

/// Calculates ECAST threshold: an average of similarities above 0.5 between pairs of given points
/// minus 0.5. Returns `None` if no pair has similarity above 0.5.
pub fn calculate_t(similarities: &Matrix, points: &[usize]) -> Option<Float> {
    let (sum, count) = points
        .iter()
        .enumerate()
        .flat_map(|(position, &i)| points[position + 1..].iter().map(move |&j| (i, j)))
        .map(|(i, j)| similarities.get(i, j))
        .filter(|&similarity| similarity > CALIBRATION_LEVEL)
        .fold((0., 0_usize), |(sum, count), similarity| (sum + similarity, count + 1));

    if count == 0 { None } else { Some(sum / count as Float - CALIBRATION_LEVEL) }
}
