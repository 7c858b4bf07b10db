#[cfg(test)]
#[path = "../../tests/unit/utils/statistics_test.rs"]
mod statistics_test;

use crate::utils::{Float, compare_floats_refs};

/// Returns median of the values: mean of two middle values for even amount of values.
/// Returns `None` for empty input.
pub fn get_median(values: &[Float]) -> Option<Float> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(compare_floats_refs);

    let middle = sorted.len() / 2;

    Some(if sorted.len() % 2 == 0 { (sorted[middle - 1] + sorted[middle]) / 2. } else { sorted[middle] })
}

/// Gets mean of values using given iterator.
pub fn get_mean_iter<Iter>(values: Iter) -> Float
where
    Iter: Iterator<Item = Float>,
{
    let (sum, count) = values.fold((0., 0), |(sum, count), item| (sum + item, count + 1));

    if count == 0 { 0. } else { sum / count as Float }
}

/// Returns euclidean norm of the vector.
pub fn get_norm<Iter>(values: Iter) -> Float
where
    Iter: Iterator<Item = Float>,
{
    values.map(|value| value * value).sum::<Float>().sqrt()
}
