use crate::utils::{Float, Random};
use std::sync::RwLock;

struct ScriptedValues<T> {
    values: Vec<T>,
}

impl<T> ScriptedValues<T> {
    fn new(mut values: Vec<T>) -> Self {
        values.reverse();
        Self { values }
    }

    fn next(&mut self) -> T {
        self.values.pop().expect("no more scripted values")
    }
}

/// A random which returns predefined values in given order.
pub struct FakeRandom {
    ints: RwLock<ScriptedValues<i32>>,
    reals: RwLock<ScriptedValues<Float>>,
}

impl FakeRandom {
    pub fn new(ints: Vec<i32>, reals: Vec<Float>) -> Self {
        Self { ints: RwLock::new(ScriptedValues::new(ints)), reals: RwLock::new(ScriptedValues::new(reals)) }
    }
}

impl Random for FakeRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        assert!(min <= max);
        let value = self.ints.write().unwrap().next();
        assert!(value >= min && value <= max, "scripted {value} is out of [{min}, {max}]");

        value
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        assert!(min < max);
        self.reals.write().unwrap().next()
    }
}
