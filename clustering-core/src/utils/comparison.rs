#[cfg(test)]
#[path = "../../tests/unit/utils/comparison_test.rs"]
mod comparison_test;

use crate::utils::Float;
use std::cmp::Ordering;

/// Compares floats treating NaN as the greatest value.
pub fn compare_floats(a: Float, b: Float) -> Ordering {
    match (a, b) {
        (x, y) if x.is_nan() && y.is_nan() => Ordering::Equal,
        (x, _) if x.is_nan() => Ordering::Greater,
        (_, y) if y.is_nan() => Ordering::Less,
        (_, _) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compares float references.
pub fn compare_floats_refs(a: &Float, b: &Float) -> Ordering {
    compare_floats(*a, *b)
}

/// Returns index of the smallest value, the lowest index wins on ties.
pub fn arg_min<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = Float>,
{
    values.into_iter().enumerate().fold(None, |best: Option<(usize, Float)>, (idx, value)| match best {
        Some((_, best_value)) if compare_floats(value, best_value) != Ordering::Less => best,
        _ => Some((idx, value)),
    })
    .map(|(idx, _)| idx)
}

/// Returns index of the greatest value, the lowest index wins on ties.
pub fn arg_max<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = Float>,
{
    values.into_iter().enumerate().fold(None, |best: Option<(usize, Float)>, (idx, value)| match best {
        Some((_, best_value)) if compare_floats(value, best_value) != Ordering::Greater => best,
        _ => Some((idx, value)),
    })
    .map(|(idx, _)| idx)
}
