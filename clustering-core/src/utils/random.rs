#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::Float;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::sync::Mutex;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max]
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the half-open interval [min, max)
    fn uniform_real(&self, min: Float, max: Float) -> Float;
}

/// A default random implementation.
pub struct DefaultRandom {
    rng: Mutex<SmallRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` with given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(SmallRng::seed_from_u64(seed)) }
    }

    /// Creates a new instance of `DefaultRandom` which produces the same sequence on each run.
    pub fn new_repeatable() -> Self {
        Self::new_with_seed(0)
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self { rng: Mutex::new(SmallRng::from_entropy()) }
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.rng.lock().unwrap().gen_range(min..=max)
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON {
            return min;
        }

        assert!(min < max);
        self.rng.lock().unwrap().gen_range(min..max)
    }
}

/// Returns a random row index in `[0, size)`.
pub fn random_index(random: &(dyn Random + Send + Sync), size: usize) -> usize {
    debug_assert!(size > 0);
    random.uniform_int(0, size as i32 - 1) as usize
}

/// Draws `amount` distinct indices from `[0, size)` using partial Fisher-Yates shuffle.
/// Returned indices keep the draw order.
pub fn sample_distinct(random: &(dyn Random + Send + Sync), size: usize, amount: usize) -> Vec<usize> {
    assert!(amount <= size);

    let mut indices = (0..size).collect::<Vec<_>>();
    (0..amount).for_each(|idx| {
        let other = random.uniform_int(idx as i32, size as i32 - 1) as usize;
        indices.swap(idx, other);
    });

    indices.truncate(amount);

    indices
}
